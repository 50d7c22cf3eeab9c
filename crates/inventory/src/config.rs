//! Inventory configuration.
//!
//! Everything has a working default; hosts may override values through
//! `JBSON_*` environment variables.

use serde::{Deserialize, Serialize};

use jbson_core::{DomainError, DomainResult};

use crate::key::UuidKeyGenerator;

pub const ENV_SKU_PREFIX: &str = "JBSON_SKU_PREFIX";
pub const ENV_SKU_SEGMENT_LEN: &str = "JBSON_SKU_SEGMENT_LEN";
pub const ENV_MAX_KEY_ATTEMPTS: &str = "JBSON_MAX_KEY_ATTEMPTS";
pub const ENV_MIN_SEARCH_LEN: &str = "JBSON_MIN_SEARCH_LEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Literal every generated key starts with.
    pub key_prefix: String,
    /// Random hex digits appended to the prefix.
    pub key_segment_len: usize,
    /// Candidate keys drawn per create before giving up.
    pub max_key_attempts: u32,
    /// Shortest accepted search term, in characters, after trimming.
    pub min_search_term_len: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            key_prefix: "SKU".to_string(),
            key_segment_len: 8,
            max_key_attempts: 16,
            min_search_term_len: 2,
        }
    }
}

impl InventoryConfig {
    /// Load overrides from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load overrides through `lookup` (variable name -> value).
    ///
    /// Unparsable numbers are logged and ignored; the result is validated.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(prefix) = lookup(ENV_SKU_PREFIX) {
            config.key_prefix = prefix.trim().to_string();
        }
        override_number(&lookup, ENV_SKU_SEGMENT_LEN, &mut config.key_segment_len);
        override_number(&lookup, ENV_MAX_KEY_ATTEMPTS, &mut config.max_key_attempts);
        override_number(&lookup, ENV_MIN_SEARCH_LEN, &mut config.min_search_term_len);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.key_prefix.is_empty() {
            return Err(DomainError::invalid_config("key prefix cannot be empty"));
        }
        if self.key_prefix.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_config("key prefix cannot contain whitespace"));
        }
        if !(1..=UuidKeyGenerator::MAX_SEGMENT_LEN).contains(&self.key_segment_len) {
            return Err(DomainError::invalid_config(format!(
                "key segment length must be between 1 and {}",
                UuidKeyGenerator::MAX_SEGMENT_LEN
            )));
        }
        if self.max_key_attempts == 0 {
            return Err(DomainError::invalid_config("max key attempts must be at least 1"));
        }
        if self.min_search_term_len == 0 {
            return Err(DomainError::invalid_config(
                "minimum search term length must be at least 1",
            ));
        }
        Ok(())
    }
}

fn override_number<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, slot: &mut T)
where
    T: core::str::FromStr + core::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, default = %slot, "ignoring unparsable setting");
        }
    }
}
