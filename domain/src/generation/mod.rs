//! Generation pipeline domain model - validation, cost, and phases

pub mod cost;
pub mod phase;
pub mod request;
