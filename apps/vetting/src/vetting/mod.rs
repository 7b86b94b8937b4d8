// Resume vetting: criteria matching, contact extraction, weighted
// classification and batch routing. Text comes from crate::extraction;
// routed bytes go to crate::storage.

pub mod classifier;
pub mod export;
pub mod fields;
pub mod handlers;
pub mod matcher;
pub mod runner;
