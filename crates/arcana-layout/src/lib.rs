//! Arcana — spread layout.
//!
//! Turns a spread's layout kind, card count, and optional hand-authored
//! positions into normalized board coordinates, and projects those onto a
//! measured container in pixels.

pub mod application;
pub mod domain;
