pub mod criteria;
pub mod document;
pub mod score;
