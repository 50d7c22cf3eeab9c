//! `jbson-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod model;

pub use error::{DomainError, DomainResult, Field};
pub use id::ItemKey;
pub use model::{Entity, ValueObject};
