//! Field validation errors
//!
//! Presence and non-negativity checks on a product submission. Both the
//! client (before submitting) and the server (before persisting) use them.

use thiserror::Error;

/// Validation failure for a product submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is missing or blank after trimming
    #[error("Product name is required")]
    EmptyName,

    /// Price is below zero
    #[error("Price must not be negative")]
    NegativePrice,

    /// Price is NaN or infinite
    #[error("Price must be a finite number")]
    NonFinitePrice,

    /// Quantity is below zero
    #[error("Quantity must not be negative")]
    NegativeQuantity,

    /// A numeric form field could not be parsed
    #[error("Invalid value for {field}: {value}")]
    Unparsable { field: &'static str, value: String },
}
