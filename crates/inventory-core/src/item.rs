//! Item model and input validation
//!
//! An [`Item`] is what the store hands back; an [`ItemInput`] is the only
//! thing the store accepts for writes. Constructing an `ItemInput` is where
//! the name/quantity rules are enforced:
//!
//! - the name is trimmed and must not be empty;
//! - the quantity is trimmed and must consist of ASCII digits only, fitting
//!   in the store's 64-bit `INTEGER` column.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A stored inventory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Auto-assigned row id, never reused
    pub id: i64,
    pub name: String,
    pub quantity: i64,
}

/// A validated name/quantity pair, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    name: String,
    quantity: i64,
}

impl ItemInput {
    /// Validate a typed pair: non-blank name, quantity of zero or more.
    pub fn new(name: impl AsRef<str>, quantity: i64) -> Result<Self, ValidationError> {
        let name = validate_name(name.as_ref())?;
        if quantity < 0 {
            return Err(ValidationError::NegativeQuantity(quantity));
        }
        Ok(Self { name, quantity })
    }

    /// Validate raw form text, as typed by the user.
    ///
    /// ```
    /// use inventory_core::ItemInput;
    ///
    /// let input = ItemInput::parse("  Pen ", "10").unwrap();
    /// assert_eq!(input.name(), "Pen");
    /// assert_eq!(input.quantity(), 10);
    ///
    /// assert!(ItemInput::parse("   ", "10").is_err());
    /// assert!(ItemInput::parse("Pen", "-1").is_err());
    /// ```
    pub fn parse(name: &str, quantity: &str) -> Result<Self, ValidationError> {
        validate_name(name)?;
        Self::new(name, parse_quantity(quantity)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(trimmed.to_string())
}

/// Parse a quantity string made only of ASCII digits.
///
/// Signs, decimal points and inner whitespace are rejected; `str::parse`
/// alone would accept a leading `+`.
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::QuantityNotDigits(raw.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::QuantityTooLarge(trimmed.to_string()))
}
