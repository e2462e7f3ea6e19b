//! Inventory reconciliation domain.
//!
//! This crate contains the business rules for the reconciliation working set,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod inventory;
pub mod item;

pub use inventory::{Inventory, ItemField, UnknownField};
pub use item::{Item, Reconciliation, Status, StatusTemplates, coerce_qty};
