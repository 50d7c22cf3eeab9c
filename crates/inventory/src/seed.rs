//! Starter catalog shown when the item form first opens.

use rust_decimal::Decimal;

use jbson_core::{DomainResult, ItemKey};

use crate::config::InventoryConfig;
use crate::item::Category;
use crate::store::InventoryStore;
use crate::validation::ValidatedFields;

/// The three starter records, under their fixed keys.
pub fn seed_catalog() -> Vec<(ItemKey, ValidatedFields)> {
    vec![
        (
            ItemKey::new("SKU001"),
            ValidatedFields::from_parts(
                "Hammer (Claw)",
                150,
                Decimal::new(1299, 2),
                "Standard 16oz claw hammer.",
                Category::Tools,
            ),
        ),
        (
            ItemKey::new("SKU002"),
            ValidatedFields::from_parts(
                "Screwdriver Set",
                80,
                Decimal::new(2450, 2),
                "6-piece mixed precision set.",
                Category::Tools,
            ),
        ),
        (
            ItemKey::new("SKU003"),
            ValidatedFields::from_parts(
                "Wood Screws (Box)",
                300,
                Decimal::new(599, 2),
                "Box of 100 2-inch wood screws.",
                Category::Hardware,
            ),
        ),
    ]
}

impl InventoryStore {
    /// Store pre-filled with [`seed_catalog`]. Seeding publishes no events.
    pub fn with_seed_catalog(config: InventoryConfig) -> DomainResult<Self> {
        Ok(Self::with_config(config)?.seeded(seed_catalog()))
    }
}
