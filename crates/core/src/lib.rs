//! `pantry-core` — shared vocabulary for the pantry crates.
//!
//! Keys, ids and the domain error type. Nothing here performs IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemKey, UserId};
pub use value_object::ValueObject;
