//! Blood bank service: inventory store, donor registry and request ledger
//! over a single [`BankStorage`] backend.
//!
//! Every operation is a load → mutate → save cycle on the whole state. The
//! cycle runs under one in-process mutex, so the check-then-act of request
//! allocation cannot interleave with another operation of the same process.
//! Nothing guards against a second process sharing the same backend.

use std::sync::Mutex;

use thiserror::Error;

use bloodbank_core::{entity, require_non_blank, DomainError, DomainResult, DonorId};
use bloodbank_donors::{Donor, RegisterDonor};
use bloodbank_inventory::InventoryMap;
use bloodbank_requests::{Allocation, BloodRequest, RequestStatus, SubmitRequest};

use crate::storage::{BankState, BankStorage, StorageError};

#[derive(Debug, Error)]
pub enum BankError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct BloodBank<S> {
    storage: S,
    guard: Mutex<()>,
}

impl<S: BankStorage> BloodBank<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            guard: Mutex::new(()),
        }
    }

    /// Load the current state, degrading to the empty state on read failure.
    fn load_or_default(&self) -> BankState {
        match self.storage.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load blood bank state; using empty state");
                BankState::default()
            }
        }
    }

    fn read<T>(&self, f: impl FnOnce(BankState) -> T) -> T {
        let _held = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        f(self.load_or_default())
    }

    /// Run `f` against the current state and persist the result.
    ///
    /// A failed load aborts the write; nothing is saved when the load or `f` fails.
    fn mutate<T>(&self, f: impl FnOnce(&mut BankState) -> DomainResult<T>) -> Result<T, BankError> {
        let _held = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = self.storage.load()?;
        let out = f(&mut state)?;
        self.storage.save(&state)?;
        Ok(out)
    }

    // ---- inventory store ----

    pub fn inventory(&self) -> InventoryMap {
        self.read(|s| s.inventory)
    }

    /// Apply `count = max(0, count + delta)` to `group` and return the new count.
    ///
    /// `group` may be any non-blank label; it is not checked against the ABO/Rh set.
    pub fn adjust(&self, group: &str, delta: i64) -> Result<u64, BankError> {
        require_non_blank("group", group)?;
        let count = self.mutate(|s| Ok(s.inventory.adjust(group, delta)))?;
        tracing::info!(group, delta, count, "inventory adjusted");
        Ok(count)
    }

    /// Credit `qty` units. A negative `qty` debits, still clamped at zero.
    pub fn add_units(&self, group: &str, qty: i64) -> Result<u64, BankError> {
        require_non_blank("group", group)?;
        let count = self.mutate(|s| Ok(s.inventory.adjust(group, qty)))?;
        tracing::info!(group, qty, count, "inventory units added");
        Ok(count)
    }

    /// Debit `qty` units, clamped at zero. A negative `qty` credits.
    pub fn remove_units(&self, group: &str, qty: i64) -> Result<u64, BankError> {
        require_non_blank("group", group)?;
        let count = self.mutate(|s| Ok(s.inventory.adjust(group, qty.saturating_neg())))?;
        tracing::info!(group, qty, count, "inventory units removed");
        Ok(count)
    }

    // ---- donor registry ----

    pub fn donors(&self) -> Vec<Donor> {
        self.read(|s| s.donors)
    }

    /// Register a donor and credit one unit of their blood group.
    pub fn register_donor(&self, cmd: RegisterDonor) -> Result<Donor, BankError> {
        let donor = self.mutate(|s| {
            let donor = cmd.into_donor()?;
            s.inventory.add(&donor.blood, 1);
            entity::prepend(&mut s.donors, donor.clone());
            Ok(donor)
        })?;
        tracing::info!(donor_id = %donor.id, blood = %donor.blood, "donor registered");
        Ok(donor)
    }

    /// Delete a donor by id. The donation credit is not reversed.
    ///
    /// Unknown ids are a silent no-op; the result is always `true`.
    pub fn remove_donor(&self, id: &str) -> Result<bool, BankError> {
        let donor_id = DonorId::from(id);
        let removed = self.mutate(|s| Ok(entity::remove_by_id(&mut s.donors, &donor_id)))?;
        tracing::info!(donor_id = %donor_id, removed, "donor delete processed");
        Ok(true)
    }

    // ---- request ledger ----

    pub fn requests(&self) -> Vec<BloodRequest> {
        self.read(|s| s.requests)
    }

    /// Submit a request and decide it against current stock.
    pub fn submit_request(&self, cmd: SubmitRequest) -> Result<Allocation, BankError> {
        let allocation = self.mutate(|s| {
            let allocation = cmd.allocate(&mut s.inventory)?;
            entity::prepend(&mut s.requests, allocation.request.clone());
            Ok(allocation)
        })?;

        let req = &allocation.request;
        match req.status {
            RequestStatus::Fulfilled => {
                tracing::info!(request_id = %req.id, blood = %req.blood, qty = req.qty, "request fulfilled")
            }
            RequestStatus::Pending => {
                tracing::info!(request_id = %req.id, blood = %req.blood, qty = req.qty, "request pending")
            }
        }
        Ok(allocation)
    }
}
