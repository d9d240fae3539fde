//! Donor registry domain module.
//!
//! This crate contains the rules for registering donors, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod donor;

pub use donor::{Donor, RegisterDonor};
