//! Commerce error types.
//!
//! Cart store operations are total and never return these; they come from
//! catalog lookups, product configuration, config loading and the cart
//! mirror.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customization group not found on the product.
    #[error("Customization group not found: {0}")]
    GroupNotFound(String),

    /// Option not found in the customization group.
    #[error("Option {option} not found in customization group {group}")]
    OptionNotFound { group: String, option: String },

    /// Related item not offered with the product.
    #[error("Related item not found: {0}")]
    RelatedItemNotFound(String),

    /// Required customization groups without a selection.
    #[error("Missing required selection: {}", .0.join(", "))]
    MissingRequiredSelection(Vec<String>),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[cfg(feature = "storage")]
impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::ConfigError(e.to_string())
    }
}

impl From<toml::ser::Error> for CommerceError {
    fn from(e: toml::ser::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
