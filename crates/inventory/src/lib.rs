//! Inventory domain module.
//!
//! This crate contains the business rules for the pantry, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). Callers read
//! the current record, ask this crate what to write, then perform the write.

pub mod catalog;
pub mod filter;
pub mod item;

pub use catalog::{image_for, PLACEHOLDER_IMAGE};
pub use filter::SearchFilter;
pub use item::{plan_add, plan_remove, InventoryItem, ItemRequest, Mutation};
