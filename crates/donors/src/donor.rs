use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bloodbank_core::{require_non_blank, DomainResult, DonorId, Entity};

/// A registered donor.
///
/// Records are immutable once created; the registry only ever adds or deletes them.
/// Optional fields default when reading older documents that lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: DonorId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub blood: String,
    #[serde(default)]
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Donor {
    type Id = DonorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: RegisterDonor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDonor {
    pub donor_id: DonorId,
    pub name: String,
    pub age: u32,
    pub blood: String,
    pub contact: String,
    pub occurred_at: DateTime<Utc>,
}

impl RegisterDonor {
    /// Build a command with a fresh id and the current time.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        blood: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            donor_id: DonorId::new(),
            name: name.into(),
            age,
            blood: blood.into(),
            contact: contact.into(),
            occurred_at: Utc::now(),
        }
    }

    /// Validate the command and produce the donor record.
    ///
    /// Only presence of `name` and `blood` is checked; there are no
    /// eligibility rules (age, donation interval).
    pub fn into_donor(self) -> DomainResult<Donor> {
        require_non_blank("name", &self.name)?;
        require_non_blank("blood", &self.blood)?;

        Ok(Donor {
            id: self.donor_id,
            name: self.name,
            age: self.age,
            blood: self.blood,
            contact: self.contact,
            created_at: self.occurred_at,
        })
    }
}
