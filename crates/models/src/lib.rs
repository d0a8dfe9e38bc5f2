//! # PHR Models
//!
//! Wire models and normalization helpers for the patient health-records API.
//!
//! Responsibilities:
//! - Decode server records (snake_case JSON) into display models where every field has a
//!   documented default, so no renderer ever sees a missing value
//! - Produce the writable wire shape for create calls, never echoing server-only fields
//! - Provide pure derived fields (formatted dates, share URLs, expiry and access-limit checks)
//!
//! Defaults are resolved field by field. Explicit `false` and `0` values from the server are
//! kept as given; only an absent key or a JSON `null` falls back to the default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod appointment;
pub mod dashboard;
pub mod dates;
mod defaults;
pub mod insurance;
pub mod lab_report;
pub mod medication;
pub mod prescription;
pub mod reminder;
pub mod sharing;
pub mod user;

pub use appointment::{Appointment, AppointmentFields, AppointmentPayload};
pub use dashboard::DashboardData;
pub use insurance::{HealthInsurance, HealthInsuranceFields, HealthInsurancePayload};
pub use lab_report::{LabReport, LabReportFields, LabReportPayload};
pub use medication::{Medication, MedicationFields, MedicationPayload};
pub use prescription::{Prescription, PrescriptionFields, PrescriptionPayload};
pub use reminder::{Reminder, ReminderFields, ReminderPayload};
pub use sharing::{
    parse_record_ids, AccessLogEntry, CreatedShare, RecordIdsInput, RecordType, ShareMethod,
    SharePayload, ShareRequest, ShareState, SharedAccess, SharedRecord, SharedRecords,
};
pub use user::{AuthSession, LoginRequest, ProfileEnvelope, RegisterRequest, User};

// Re-export the validated identifier so callers need only one import path.
pub use phr_types::{NonEmptyText, RecordId, TextError};

/// Errors returned by the model layer.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("failed to serialize: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Results that can fail with a [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Decode a JSON value into `T`, reporting the path of the first field that does not match.
///
/// This uses `serde_path_to_error` so a malformed server response names the offending field
/// (for example `data[3].refill_reminder_days`) instead of failing with a bare type error.
///
/// # Arguments
///
/// * `kind` - Human readable name of the expected shape, used in the error message.
/// * `value` - Raw JSON as received from the API.
///
/// # Errors
///
/// Returns [`ModelError::Translation`] if the value does not match the expected shape.
pub fn decode<T: DeserializeOwned>(kind: &str, value: serde_json::Value) -> ModelResult<T> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(ModelError::Translation(format!(
                "{kind} schema mismatch at {path}: {source}"
            )))
        }
    }
}

/// A record family the client can create, update and delete.
///
/// Each family has three shapes:
/// - the display model (`Self`), decoded from server JSON with defaults applied,
/// - a partial `Fields` struct holding user-entered values, used as form state and as the
///   body of update calls (unset fields are omitted from the wire),
/// - a `Payload` struct holding exactly the fields the server accepts on create.
pub trait Entity: DeserializeOwned + Sized {
    /// Name used in decode error messages.
    const KIND: &'static str;

    type Fields: Serialize;
    type Payload: Serialize;

    /// The writable wire shape of this record.
    fn to_payload(&self) -> Self::Payload;

    /// Decode a server record.
    fn from_wire(value: serde_json::Value) -> ModelResult<Self> {
        decode(Self::KIND, value)
    }

    /// Build a model from user-entered fields, applying the same defaults as a server decode.
    fn from_fields(fields: &Self::Fields) -> ModelResult<Self> {
        let value = serde_json::to_value(fields)?;
        Self::from_wire(value)
    }
}

/// Body the server returns for update and delete calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Acknowledgement {
    #[serde(default, deserialize_with = "defaults::or_default")]
    pub message: String,
}

/// One page of a list endpoint.
///
/// The server wraps every list in `{"data": [...]}`; paginated endpoints add `total`. A `null`
/// data member (an empty slice on the server side) decodes as an empty list.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "defaults::or_default")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}
