//! The inventory store: sole owner of the keyed item collection.
//!
//! All access goes through one `RwLock`. Writers (`create`, `update`,
//! `delete`, `set_status`) hold the write lock for the whole operation, so a
//! reader never sees a half-applied change. Nothing in here blocks on IO.
//!
//! Every writer does its fallible or foreign work (key generation) before it
//! touches the collection, so a panic never leaves `Inner` half-written. A
//! poisoned lock is therefore recovered and the store keeps working.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jbson_core::{DomainError, DomainResult, ItemKey};
use jbson_events::{EventBus, InMemoryEventBus, Subscription};

use crate::config::InventoryConfig;
use crate::event::InventoryEvent;
use crate::item::{Item, ItemStatus};
use crate::key::{KeyGenerator, UuidKeyGenerator};
use crate::query::{QueryEngine, QuerySpec};
use crate::validation::ValidatedFields;

struct Inner {
    items: HashMap<ItemKey, Item>,
    /// Keys in insertion order, for stable list display.
    order: Vec<ItemKey>,
    keys: Box<dyn KeyGenerator>,
}

impl Inner {
    fn new(keys: Box<dyn KeyGenerator>) -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
            keys,
        }
    }

    fn insert(&mut self, item: Item) {
        let key = item.key.clone();
        self.items.insert(key.clone(), item);
        self.order.push(key);
    }

    /// Draw candidates until one is not in use, at most `max_attempts` times.
    fn next_free_key(&mut self, max_attempts: u32) -> DomainResult<ItemKey> {
        for attempt in 1..=max_attempts {
            let candidate = self.keys.next_candidate();
            if !self.items.contains_key(&candidate) {
                return Ok(candidate);
            }
            tracing::warn!(key = %candidate, attempt, "generated key already in use; drawing another");
        }

        tracing::error!(attempts = max_attempts, "could not generate an unused item key");
        Err(DomainError::KeyGenerationExhausted {
            attempts: max_attempts,
        })
    }

    fn snapshot(&self) -> Vec<Item> {
        self.order
            .iter()
            .filter_map(|key| self.items.get(key))
            .cloned()
            .collect()
    }
}

/// Keyed item collection with create/read/update/delete.
///
/// Share it across threads with `Arc<InventoryStore>`. Successful mutations
/// publish an [`InventoryEvent`] on the store's bus while the write lock is
/// still held, so events arrive in the order the writes were applied.
pub struct InventoryStore<B = InMemoryEventBus<InventoryEvent>> {
    config: InventoryConfig,
    inner: RwLock<Inner>,
    bus: B,
}

impl InventoryStore {
    /// Empty store with default configuration.
    pub fn new() -> Self {
        Self::build(InventoryConfig::default(), InMemoryEventBus::new())
    }

    /// Empty store with the given (validated) configuration.
    pub fn with_config(config: InventoryConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self::build(config, InMemoryEventBus::new()))
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> core::fmt::Debug for InventoryStore<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let len = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .len();
        f.debug_struct("InventoryStore")
            .field("config", &self.config)
            .field("len", &len)
            .finish_non_exhaustive()
    }
}

impl<B> InventoryStore<B>
where
    B: EventBus<InventoryEvent>,
{
    fn build(config: InventoryConfig, bus: B) -> Self {
        let keys = Box::new(UuidKeyGenerator::from_config(&config));
        Self {
            config,
            inner: RwLock::new(Inner::new(keys)),
            bus,
        }
    }

    /// Replace the key generator (e.g. with a deterministic sequence).
    pub fn with_key_generator(mut self, keys: impl KeyGenerator + 'static) -> Self {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        inner.keys = Box::new(keys);
        self
    }

    /// Publish activity on `bus` instead of the built-in one.
    pub fn with_bus<B2>(self, bus: B2) -> InventoryStore<B2>
    where
        B2: EventBus<InventoryEvent>,
    {
        InventoryStore {
            config: self.config,
            inner: self.inner,
            bus,
        }
    }

    /// Insert records under fixed keys, skipping keys already present.
    pub(crate) fn seeded(mut self, records: impl IntoIterator<Item = (ItemKey, ValidatedFields)>) -> Self {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (key, fields) in records {
            if !inner.items.contains_key(&key) {
                inner.insert(Item::from_fields(key, fields));
            }
        }
        self
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Receive every event published after this call, in write order.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    /// Insert a new record under a freshly generated key.
    pub fn create(&self, fields: ValidatedFields) -> DomainResult<ItemKey> {
        let mut inner = self.write();
        let key = inner.next_free_key(self.config.max_key_attempts)?;
        let item = Item::from_fields(key, fields);
        inner.insert(item.clone());

        tracing::info!(key = %item.key, name = %item.name, quantity = item.quantity, "added inventory item");
        self.publish(InventoryEvent::added(&item));
        Ok(item.key)
    }

    pub fn read(&self, key: &ItemKey) -> DomainResult<Item> {
        self.read_lock()
            .items
            .get(key)
            .cloned()
            .ok_or_else(|| DomainError::not_found(key.clone()))
    }

    /// Replace every field of `key` except the key itself and its status.
    pub fn update(&self, key: &ItemKey, fields: ValidatedFields) -> DomainResult<Item> {
        let mut inner = self.write();
        let item = inner
            .items
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(key.clone()))?;
        let previous_quantity = item.quantity;
        item.replace_fields(fields);
        let item = item.clone();

        tracing::info!(
            key = %item.key,
            name = %item.name,
            previous_quantity,
            quantity = item.quantity,
            "updated inventory item"
        );
        self.publish(InventoryEvent::updated(&item, previous_quantity));
        Ok(item)
    }

    /// Remove `key` and return the record that was removed.
    pub fn delete(&self, key: &ItemKey) -> DomainResult<Item> {
        let mut inner = self.write();
        let item = inner
            .items
            .remove(key)
            .ok_or_else(|| DomainError::not_found(key.clone()))?;
        inner.order.retain(|k| k != key);

        tracing::info!(key = %item.key, name = %item.name, "removed inventory item");
        self.publish(InventoryEvent::removed(&item));
        Ok(item)
    }

    /// Mark an item discontinued or active again.
    pub fn set_status(&self, key: &ItemKey, status: ItemStatus) -> DomainResult<Item> {
        let mut inner = self.write();
        let item = inner
            .items
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found(key.clone()))?;
        let changed = item.status != status;
        item.status = status;
        let item = item.clone();

        if changed {
            tracing::info!(key = %item.key, status = ?item.status, "changed inventory item status");
            self.publish(InventoryEvent::status_changed(&item));
        }
        Ok(item)
    }

    /// Copies of every record, in insertion order.
    pub fn list(&self) -> Vec<Item> {
        self.read_lock().snapshot()
    }

    /// Run `spec` against the collection while holding the read lock.
    pub fn search(&self, spec: &QuerySpec) -> DomainResult<Vec<Item>> {
        let engine = QueryEngine::from_config(&self.config);
        engine.check_term(spec)?;
        let inner = self.read_lock();
        engine.query(&inner.snapshot(), spec)
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.read_lock().items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read_lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering inventory lock after a panicked writer");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering inventory lock after a panicked writer");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }

    fn publish(&self, event: InventoryEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = ?err, "failed to publish inventory event");
        }
    }
}
