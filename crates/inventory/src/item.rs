use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use jbson_core::{DomainError, Entity, Field, ItemKey};

use crate::validation::ValidatedFields;

/// Product category, as offered by the search form's category list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hardware,
    Electrical,
    Plumbing,
    Paint,
    Tools,
    #[default]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Hardware,
        Category::Electrical,
        Category::Plumbing,
        Category::Paint,
        Category::Tools,
        Category::Uncategorized,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Hardware => "Hardware",
            Category::Electrical => "Electrical",
            Category::Plumbing => "Plumbing",
            Category::Paint => "Paint",
            Category::Tools => "Tools",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::invalid(Field::Category))
    }
}

/// Whether an item is still sold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Discontinued,
}

impl ItemStatus {
    pub fn is_active(self) -> bool {
        self == ItemStatus::Active
    }
}

/// Snapshot of one inventory record.
///
/// Values of this type are copies handed out by the store; changing one has
/// no effect on the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: ItemKey,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub description: String,
    pub category: Category,
    pub status: ItemStatus,
}

impl Item {
    pub(crate) fn from_fields(key: ItemKey, fields: ValidatedFields) -> Self {
        let (name, quantity, unit_price, description, category) = fields.into_parts();
        Self {
            key,
            name,
            quantity,
            unit_price,
            description,
            category,
            status: ItemStatus::Active,
        }
    }

    /// Overwrite everything except `key` and `status`.
    pub(crate) fn replace_fields(&mut self, fields: ValidatedFields) {
        let (name, quantity, unit_price, description, category) = fields.into_parts();
        self.name = name;
        self.quantity = quantity;
        self.unit_price = unit_price;
        self.description = description;
        self.category = category;
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Line used by list views: `[SKU001] Hammer (Claw) | Qty: 150 | Price: ₱12.99`.
    pub fn display_line(&self) -> String {
        format!(
            "[{}] {} | Qty: {} | Price: ₱{:.2}",
            self.key, self.name, self.quantity, self.unit_price
        )
    }

    /// Whether this record holds exactly the given payload.
    pub fn matches_fields(&self, fields: &ValidatedFields) -> bool {
        self.name == fields.name()
            && self.quantity == fields.quantity()
            && self.unit_price == fields.unit_price()
            && self.description == fields.description()
            && self.category == fields.category()
    }
}

impl Entity for Item {
    type Id = ItemKey;

    fn id(&self) -> &Self::Id {
        &self.key
    }
}
