use chrono::{DateTime, Utc};

/// A fact about something that already happened to the inventory.
///
/// Events are immutable and carry a stable type name, so a UI shell can turn
/// them into notices ("Item successfully ADDED") or an activity log line.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "inventory.item.added").
    fn event_type(&self) -> &'static str;

    /// When the change was applied.
    fn occurred_at(&self) -> DateTime<Utc>;
}
