use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jbson_core::ItemKey;
use jbson_events::Event;

use crate::item::{Item, ItemStatus};

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub key: ItemKey,
    pub name: String,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub key: ItemKey,
    pub name: String,
    pub previous_quantity: u32,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub key: ItemKey,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemStatusChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatusChanged {
    pub key: ItemKey,
    pub status: ItemStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Activity published by the store after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    ItemStatusChanged(ItemStatusChanged),
}

impl InventoryEvent {
    pub(crate) fn added(item: &Item) -> Self {
        Self::ItemAdded(ItemAdded {
            key: item.key.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            occurred_at: Utc::now(),
        })
    }

    pub(crate) fn updated(item: &Item, previous_quantity: u32) -> Self {
        Self::ItemUpdated(ItemUpdated {
            key: item.key.clone(),
            name: item.name.clone(),
            previous_quantity,
            quantity: item.quantity,
            occurred_at: Utc::now(),
        })
    }

    pub(crate) fn removed(item: &Item) -> Self {
        Self::ItemRemoved(ItemRemoved {
            key: item.key.clone(),
            name: item.name.clone(),
            occurred_at: Utc::now(),
        })
    }

    pub(crate) fn status_changed(item: &Item) -> Self {
        Self::ItemStatusChanged(ItemStatusChanged {
            key: item.key.clone(),
            status: item.status,
            occurred_at: Utc::now(),
        })
    }

    pub fn key(&self) -> &ItemKey {
        match self {
            InventoryEvent::ItemAdded(e) => &e.key,
            InventoryEvent::ItemUpdated(e) => &e.key,
            InventoryEvent::ItemRemoved(e) => &e.key,
            InventoryEvent::ItemStatusChanged(e) => &e.key,
        }
    }

    /// Activity log line, e.g. `Added new item SKU1A2B3C4D.`
    pub fn summary(&self) -> String {
        match self {
            InventoryEvent::ItemAdded(e) => format!("Added new item {}.", e.key),
            InventoryEvent::ItemUpdated(e) => format!(
                "Updated item {} ({}). Qty: {} -> {}.",
                e.key, e.name, e.previous_quantity, e.quantity
            ),
            InventoryEvent::ItemRemoved(e) => format!("Removed item {} ({}).", e.key, e.name),
            InventoryEvent::ItemStatusChanged(e) => {
                format!("Item {} is now {:?}.", e.key, e.status)
            }
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemUpdated(_) => "inventory.item.updated",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
            InventoryEvent::ItemStatusChanged(_) => "inventory.item.status_changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemUpdated(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::ItemStatusChanged(e) => e.occurred_at,
        }
    }
}
