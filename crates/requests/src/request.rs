use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bloodbank_core::{require_non_blank, DomainError, DomainResult, Entity, RequestId};
use bloodbank_inventory::InventoryMap;

/// Outcome of a request, decided once at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

/// A submitted blood request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: RequestId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blood: String,
    pub qty: u64,
    #[serde(default)]
    pub loc: String,
    #[serde(default)]
    pub contact: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for BloodRequest {
    type Id = RequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: SubmitRequest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub request_id: RequestId,
    pub name: String,
    pub blood: String,
    pub qty: i64,
    pub loc: String,
    pub contact: String,
    pub occurred_at: DateTime<Utc>,
}

/// A decided request plus the human-readable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub request: BloodRequest,
    pub message: String,
}

impl SubmitRequest {
    /// Build a command with a fresh id and the current time.
    pub fn new(
        name: impl Into<String>,
        blood: impl Into<String>,
        qty: i64,
        loc: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            request_id: RequestId::new(),
            name: name.into(),
            blood: blood.into(),
            qty,
            loc: loc.into(),
            contact: contact.into(),
            occurred_at: Utc::now(),
        }
    }

    fn validate(&self) -> DomainResult<u64> {
        require_non_blank("name", &self.name)?;
        require_non_blank("blood", &self.blood)?;
        match u64::try_from(self.qty) {
            Ok(qty) if qty > 0 => Ok(qty),
            _ => Err(DomainError::validation("qty must be a positive integer")),
        }
    }

    /// Validate, then allocate against `inventory`.
    ///
    /// The whole quantity is deducted when `available >= qty`; otherwise the
    /// request is recorded as pending and `inventory` is left untouched.
    /// There is no partial allocation and no later re-evaluation.
    pub fn allocate(self, inventory: &mut InventoryMap) -> DomainResult<Allocation> {
        let qty = self.validate()?;
        let available = inventory.available(&self.blood);

        let (status, message) = if available >= qty {
            inventory.remove(&self.blood, qty);
            (RequestStatus::Fulfilled, format!("Allocated {qty} unit(s)"))
        } else {
            (
                RequestStatus::Pending,
                format!("Not enough inventory. Available: {available}"),
            )
        };

        Ok(Allocation {
            request: BloodRequest {
                id: self.request_id,
                name: self.name,
                blood: self.blood,
                qty,
                loc: self.loc,
                contact: self.contact,
                status,
                created_at: self.occurred_at,
            },
            message,
        })
    }
}
