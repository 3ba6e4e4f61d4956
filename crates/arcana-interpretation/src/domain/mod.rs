//! Interpretation domain model.

pub mod errors;
pub mod payload;
pub mod persona;
