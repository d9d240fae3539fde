//! Request ledger domain module.
//!
//! Validates blood requests and decides, once and at submission time, whether
//! a request is fulfilled from stock or left pending.

pub mod request;

pub use request::{Allocation, BloodRequest, RequestStatus, SubmitRequest};
