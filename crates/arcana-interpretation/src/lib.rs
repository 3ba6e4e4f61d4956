//! Arcana — interpretation.
//!
//! Packages a confirmed draw for the external interpretation service,
//! gates personas through an injected capability registry, and applies
//! answers to the session under its locale rule.

pub mod application;
pub mod domain;
pub mod infrastructure;
