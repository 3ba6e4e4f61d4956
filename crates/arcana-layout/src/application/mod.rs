//! Entry points used by sessions and hosts.

pub mod board;
pub mod resolver;
