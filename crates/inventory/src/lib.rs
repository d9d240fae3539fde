//! Inventory domain module (blood-group unit counts).
//!
//! This crate contains the stock-keeping rules for blood units, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod stock;

pub use stock::{default_seed, InventoryMap, BLOOD_GROUPS};
