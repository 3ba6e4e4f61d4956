//! Service adapters.

pub mod http_client;
