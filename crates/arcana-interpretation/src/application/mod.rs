//! The interpretation gateway.

pub mod gateway;
