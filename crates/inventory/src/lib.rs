//! Inventory record management for the JBSON Hardware item forms.
//!
//! Raw form input is validated into [`ValidatedFields`], stored under a
//! generated [`ItemKey`] by the [`InventoryStore`], and searched with the
//! [`QueryEngine`]. No IO, no persistence: the store lives for the process.

pub mod config;
pub mod event;
pub mod item;
pub mod key;
pub mod query;
pub mod seed;
pub mod store;
pub mod validation;

pub use config::InventoryConfig;
pub use event::{InventoryEvent, ItemAdded, ItemRemoved, ItemStatusChanged, ItemUpdated};
pub use item::{Category, Item, ItemStatus};
pub use jbson_core::{DomainError, DomainResult, Field, ItemKey};
pub use key::{KeyGenerator, SequenceKeyGenerator, UuidKeyGenerator};
pub use query::{CategoryFilter, FieldScope, QueryEngine, QuerySpec, SortKey, query};
pub use seed::seed_catalog;
pub use store::InventoryStore;
pub use validation::{ValidatedFields, validate};
