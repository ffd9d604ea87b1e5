//! Values compared by content.

/// Immutable value with no identity of its own.
///
/// A search filter is a value; an inventory item is an
/// [`Entity`](crate::Entity).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
