//! Identity provider adapters.

pub mod firebase;
pub mod in_memory;

pub use firebase::FirebaseIdentityProvider;
pub use in_memory::InMemoryIdentityProvider;
