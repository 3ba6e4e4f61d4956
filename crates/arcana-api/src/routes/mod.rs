//! Route modules.

pub mod health;
pub mod layouts;
pub mod sessions;
