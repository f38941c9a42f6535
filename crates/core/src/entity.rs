//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Master records fetched from the backend (tax rates, voucher types, stored
/// vouchers) are entities: two records with the same id are the same record,
/// even when a later fetch carries different attribute values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
