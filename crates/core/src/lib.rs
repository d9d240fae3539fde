//! `bloodbank-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{require_non_blank, DomainError, DomainResult};
pub use id::{DonorId, RequestId};
