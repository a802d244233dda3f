//! Data models
//!
//! Shared between inventory-server and its clients (via API).
//! IDs are `i64`, assigned by the server.

pub mod product;

// Re-exports
pub use product::*;
