//! Error types for the inventory core
//!
//! Every fallible operation in this crate returns [`InventoryError`]. Input
//! problems are reported through [`ValidationError`] before any SQL runs, so
//! a rejected form never touches the store.

use thiserror::Error;

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Main error type for inventory operations
#[derive(Error, Debug)]
pub enum InventoryError {
    /// User input rejected before reaching the store
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Update or delete addressed an id that has no row
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// SQLite errors (connection, schema, statement)
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons an item name/quantity pair is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must not be blank")]
    BlankName,

    #[error("Quantity must be a whole number of zero or more, got {0:?}")]
    QuantityNotDigits(String),

    #[error("Quantity is too large: {0}")]
    QuantityTooLarge(String),

    #[error("Quantity must not be negative, got {0}")]
    NegativeQuantity(i64),
}

impl From<toml::de::Error> for InventoryError {
    fn from(e: toml::de::Error) -> Self {
        InventoryError::Config(e.to_string())
    }
}
