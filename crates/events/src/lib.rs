//! Activity events and their in-process distribution.
//!
//! Inventory mutations publish one event each; a UI shell subscribes to show
//! confirmations and keep an activity log.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
