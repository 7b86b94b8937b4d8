//! Resume vetting service: extracts text from uploaded CVs, scores it against
//! keyword criteria, pulls out contact details and routes accepted files.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;
pub mod vetting;
