use serde::{Deserialize, Serialize};

use bloodbank_donors::RegisterDonor;
use bloodbank_requests::{Allocation, BloodRequest, SubmitRequest};

// -------------------------
// Request DTOs
// -------------------------
//
// Text fields default to "" and numbers to "absent" so a missing required
// field is reported by domain validation instead of a body rejection.
// Numbers are accepted as JSON numbers or numeric strings, as browser forms send them.

mod lenient {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberLike {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// `null`, `""` and a missing field read as `None`.
    pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        match Option::<NumberLike>::deserialize(d)? {
            None => Ok(None),
            Some(NumberLike::Int(n)) => Ok(Some(n)),
            Some(NumberLike::Float(f)) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f as i64)),
            Some(NumberLike::Float(f)) => {
                Err(de::Error::custom(format!("expected a whole number, got {f}")))
            }
            Some(NumberLike::Text(t)) if t.trim().is_empty() => Ok(None),
            Some(NumberLike::Text(t)) => t
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("expected a number, got {t:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdjustInventoryRequest {
    #[serde(default)]
    pub group: String,
    /// Defaults to 1. Signed: the clamp at zero still applies.
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub qty: Option<i64>,
}

impl AdjustInventoryRequest {
    pub fn qty(&self) -> i64 {
        self.qty.unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterDonorRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub age: Option<i64>,
    #[serde(default)]
    pub blood: String,
    #[serde(default)]
    pub contact: String,
}

impl From<RegisterDonorRequest> for RegisterDonor {
    fn from(body: RegisterDonorRequest) -> Self {
        let age = body
            .age
            .map(|a| u32::try_from(a.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0);
        RegisterDonor::new(body.name, age, body.blood, body.contact)
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequestRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub blood: String,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub qty: Option<i64>,
    #[serde(default)]
    pub loc: String,
    #[serde(default)]
    pub contact: String,
}

impl From<SubmitRequestRequest> for SubmitRequest {
    fn from(body: SubmitRequestRequest) -> Self {
        SubmitRequest::new(body.name, body.blood, body.qty.unwrap_or(0), body.loc, body.contact)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct GroupCountResponse {
    pub group: String,
    pub qty: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitRequestResponse {
    pub request: BloodRequest,
    pub message: String,
}

impl From<Allocation> for SubmitRequestResponse {
    fn from(a: Allocation) -> Self {
        Self {
            request: a.request,
            message: a.message,
        }
    }
}
