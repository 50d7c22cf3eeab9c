//! Marker traits separating keyed records from plain values.

/// A record with an identity that survives updates.
///
/// Inventory items are entities: editing every attribute of an item still
/// leaves the same item, because its key never changes.
pub trait Entity {
    /// Strongly-typed identifier (never reassigned).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether this entity is the one identified by `id`.
    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}

/// Marker for values compared by their attributes alone.
///
/// Validated form payloads are value objects: two payloads with the same
/// name, quantity, price and description are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
