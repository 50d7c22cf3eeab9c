//! Item key generation.
//!
//! Keys look like `SKU1A2B3C4D`: a fixed prefix followed by a random
//! upper-case hex segment. The store checks each candidate against the
//! collection and redraws on collision, so generators only have to produce
//! candidates.

use std::collections::VecDeque;

use uuid::Uuid;

use jbson_core::{DomainError, DomainResult, ItemKey};

use crate::config::InventoryConfig;

/// Source of candidate keys.
pub trait KeyGenerator: Send + Sync {
    fn next_candidate(&mut self) -> ItemKey;
}

/// Random keys: `prefix` + the first `segment_len` hex digits of a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidKeyGenerator {
    prefix: String,
    segment_len: usize,
}

impl UuidKeyGenerator {
    /// A v4 UUID renders as 32 hex digits.
    pub const MAX_SEGMENT_LEN: usize = 32;

    pub fn new(prefix: impl Into<String>, segment_len: usize) -> Self {
        Self {
            prefix: prefix.into(),
            segment_len: segment_len.clamp(1, Self::MAX_SEGMENT_LEN),
        }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.key_prefix.clone(), config.key_segment_len)
    }
}

impl Default for UuidKeyGenerator {
    fn default() -> Self {
        Self::from_config(&InventoryConfig::default())
    }
}

impl KeyGenerator for UuidKeyGenerator {
    fn next_candidate(&mut self) -> ItemKey {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        ItemKey::new(format!("{}{}", self.prefix, &hex[..self.segment_len]))
    }
}

/// Hands out a fixed list of keys in order, repeating the last one forever.
///
/// Deterministic keys for fixtures and for exercising the collision path.
#[derive(Debug, Clone)]
pub struct SequenceKeyGenerator {
    queue: VecDeque<ItemKey>,
    last: ItemKey,
    drawn: usize,
}

impl SequenceKeyGenerator {
    /// Fails with `InvalidConfig` if `keys` is empty.
    pub fn new<I, K>(keys: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let queue: VecDeque<ItemKey> = keys.into_iter().map(ItemKey::new).collect();
        let last = queue
            .back()
            .cloned()
            .ok_or_else(|| DomainError::invalid_config("key sequence needs at least one key"))?;
        Ok(Self {
            queue,
            last,
            drawn: 0,
        })
    }

    /// Number of candidates handed out so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl KeyGenerator for SequenceKeyGenerator {
    fn next_candidate(&mut self) -> ItemKey {
        self.drawn += 1;
        self.queue.pop_front().unwrap_or_else(|| self.last.clone())
    }
}
