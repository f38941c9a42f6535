//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**; they are defined entirely by their
/// attribute values and are treated as immutable. Computed results such as a
/// line's tax-inclusive total or a voucher's debit/credit summary are value
/// objects: recomputing them from the same inputs yields an equal value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
