//! Field validation for the item form.
//!
//! Raw form strings go in, a [`ValidatedFields`] payload comes out. The
//! validator never looks at the collection; key uniqueness is the store's job.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use jbson_core::{DomainError, DomainResult, Field, ValueObject};

use crate::item::Category;

/// Normalized item payload that passed validation.
///
/// Only [`validate`] produces one, so the store accepts it without checking
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedFields {
    name: String,
    quantity: u32,
    unit_price: Decimal,
    description: String,
    category: Category,
}

impl ValueObject for ValidatedFields {}

impl ValidatedFields {
    pub(crate) fn from_parts(
        name: &str,
        quantity: u32,
        unit_price: Decimal,
        description: &str,
        category: Category,
    ) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit_price,
            description: description.to_string(),
            category,
        }
    }

    pub(crate) fn into_parts(self) -> (String, u32, Decimal, String, Category) {
        (
            self.name,
            self.quantity,
            self.unit_price,
            self.description,
            self.category,
        )
    }

    /// Attach the category picked from the form's category list.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Validate the four item form fields.
///
/// Presence of every required field is checked before any format check, the
/// same order the form reports errors in.
pub fn validate(
    raw_name: &str,
    raw_quantity: &str,
    raw_price: &str,
    raw_description: &str,
) -> DomainResult<ValidatedFields> {
    let name = required_text(raw_name, Field::Name)?;
    let quantity = required_text(raw_quantity, Field::Quantity)?;
    let price = required_text(raw_price, Field::Price)?;

    let quantity = non_negative_integer(quantity, Field::Quantity)?;
    let unit_price = positive_decimal(price, Field::Price)?;

    Ok(ValidatedFields {
        name: name.to_string(),
        quantity,
        unit_price,
        description: raw_description.trim().to_string(),
        category: Category::default(),
    })
}

/// Trimmed text, or `MissingField` when nothing is left.
pub fn required_text(raw: &str, field: Field) -> DomainResult<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::missing(field));
    }
    Ok(trimmed)
}

/// Whole number in `0..=u32::MAX`.
pub fn non_negative_integer(raw: &str, field: Field) -> DomainResult<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| DomainError::invalid(field))?;
    u32::try_from(value).map_err(|_| DomainError::invalid(field))
}

/// Decimal strictly greater than zero.
pub fn positive_decimal(raw: &str, field: Field) -> DomainResult<Decimal> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| DomainError::invalid(field))?;
    if value <= Decimal::ZERO {
        return Err(DomainError::invalid(field));
    }
    Ok(value)
}
