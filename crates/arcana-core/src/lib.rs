//! Arcana Core — shared reading model and ports.
//!
//! This crate defines the spread schema, deck records, locale handling, the
//! interpretation wire contract, and the traits every other crate injects
//! (randomness, time, spread/deck/interpretation sources). It contains no
//! infrastructure code.

pub mod clock;
pub mod deck;
pub mod error;
pub mod interpretation;
pub mod locale;
pub mod repository;
pub mod rng;
pub mod spread;
