//! Arcana — file-backed catalog.
//!
//! Adapters that serve spreads, decks, and persona capabilities from files
//! on disk.

pub mod decks;
pub mod personas;
pub mod spreads;
