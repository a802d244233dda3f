//! Shared types for the inventory workspace
//!
//! Wire models exchanged between `inventory-client` and `inventory-server`,
//! field validation, money helpers and the small JSON bodies the API returns.

pub mod error;
pub mod models;
pub mod money;
pub mod response;

// Re-exports
pub use error::ValidationError;
pub use models::{ProductFields, ProductRecord, ProductStats};
pub use response::{ErrorBody, MessageResponse};
pub use serde::{Deserialize, Serialize};
