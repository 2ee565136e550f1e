//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records that are created once and then mutated in place by later pipeline
/// stages (shipments) are entities; incoming events are not.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
