//! Shared helpers used by the service and server crates.

pub mod types;
pub mod utils;
