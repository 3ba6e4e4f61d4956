//! Session domain model.

pub mod aggregates;
pub mod draw;
pub mod errors;
