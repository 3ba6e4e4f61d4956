//! Arcana — reading sessions.
//!
//! Owns one spread visit from loading through card selection, the draw, and
//! the interpretation status of the resulting reading.

pub mod application;
pub mod domain;
