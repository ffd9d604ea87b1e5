//! Records that keep their identity while their state changes.

/// A record addressed by a stable key.
///
/// An inventory item stays "milk" whether it holds 1 or 12 units.
pub trait Entity {
    type Id: Clone + Eq + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether both records refer to the same thing, regardless of state.
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
