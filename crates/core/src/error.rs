//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ItemKey;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Input field an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Key,
    Name,
    Quantity,
    Price,
    Description,
    Category,
    SearchTerm,
    SearchScope,
    SortOrder,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Name => "name",
            Field::Quantity => "quantity",
            Field::Price => "price",
            Field::Description => "description",
            Field::Category => "category",
            Field::SearchTerm => "search term",
            Field::SearchScope => "search scope",
            Field::SortOrder => "sort order",
        }
    }

    /// Label used in messages shown to the user.
    fn label(self) -> &'static str {
        match self {
            Field::Key => "SKU / Item Code",
            Field::Name => "Item Name",
            Field::Quantity => "Quantity",
            Field::Price => "Unit Price",
            Field::Description => "Description",
            Field::Category => "Category",
            Field::SearchTerm => "Search term",
            Field::SearchScope => "Search in",
            Field::SortOrder => "Sort by",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Every variant is returned as a value at the operation boundary; none of them
/// leaves a partially applied mutation behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input was empty.
    #[error("{0} is required")]
    MissingField(Field),

    /// An input was present but failed type or range parsing.
    #[error("{0} has an invalid format")]
    InvalidFormat(Field),

    /// The referenced key is not in the collection.
    #[error("item not found: {0}")]
    NotFound(ItemKey),

    /// Every candidate key drawn during a create collided with an existing one.
    #[error("key generation exhausted after {attempts} attempts")]
    KeyGenerationExhausted { attempts: u32 },

    /// Configuration values were rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn missing(field: Field) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid(field: Field) -> Self {
        Self::InvalidFormat(field)
    }

    pub fn not_found(key: ItemKey) -> Self {
        Self::NotFound(key)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// The field this error is about, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            DomainError::MissingField(f) | DomainError::InvalidFormat(f) => Some(*f),
            _ => None,
        }
    }

    /// Sentence suitable for an inline error label or a dialog.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::MissingField(f) => format!("Error: {} is required.", f.label()),
            DomainError::InvalidFormat(Field::Quantity) => {
                "Error: Quantity must be a non-negative whole number.".to_string()
            }
            DomainError::InvalidFormat(Field::Price) => {
                "Error: Unit Price must be a positive number.".to_string()
            }
            DomainError::InvalidFormat(Field::SearchTerm) => {
                "Error: Search term is too short.".to_string()
            }
            DomainError::InvalidFormat(f) => format!("Error: {} is not valid.", f.label()),
            DomainError::NotFound(_) => {
                "Error: Select an item from the list or clear the form to add a new one."
                    .to_string()
            }
            DomainError::KeyGenerationExhausted { .. } => {
                "Error: Could not assign an item code. Please try again.".to_string()
            }
            DomainError::InvalidConfig(msg) => format!("Error: {msg}"),
        }
    }
}
