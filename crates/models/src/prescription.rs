//! Prescription records.

use crate::dates::{self, date_or_today, optional_date, optional_date_time};
use crate::defaults::{default_true, or_default, or_true};
use crate::Entity;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// A prescription as displayed to the patient.
///
/// `prescription_date` defaults to today and `is_active` to `true` when the server omits them.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Prescription {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub medicine_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub dosage: String,
    #[serde(default, deserialize_with = "or_default")]
    pub instructions: String,
    #[serde(default, deserialize_with = "or_default")]
    pub prescribing_doctor: String,
    #[serde(default, deserialize_with = "or_default")]
    pub doctor_specialty: String,
    #[serde(default, deserialize_with = "or_default")]
    pub hospital: String,
    #[serde(default = "dates::today", with = "date_or_today")]
    pub prescription_date: NaiveDate,
    #[serde(default, deserialize_with = "or_default")]
    pub attachment_url: String,
    #[serde(default, deserialize_with = "or_default")]
    pub attachment_type: String,
    #[serde(default = "default_true", deserialize_with = "or_true")]
    pub is_active: bool,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Prescription {
    pub fn formatted_date(&self) -> String {
        dates::format_date(&self.prescription_date)
    }

    pub fn has_attachment(&self) -> bool {
        !self.attachment_url.is_empty()
    }
}

/// User-entered prescription values. Unset fields are omitted from the wire.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PrescriptionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescribing_doctor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub prescription_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// The fields the server accepts when creating a prescription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionPayload {
    pub medicine_name: String,
    pub dosage: String,
    pub instructions: String,
    pub prescribing_doctor: String,
    pub doctor_specialty: String,
    pub hospital: String,
    #[serde(with = "date_or_today")]
    pub prescription_date: NaiveDate,
    pub attachment_url: String,
    pub attachment_type: String,
    pub is_active: bool,
}

impl Entity for Prescription {
    const KIND: &'static str = "prescription";

    type Fields = PrescriptionFields;
    type Payload = PrescriptionPayload;

    fn to_payload(&self) -> PrescriptionPayload {
        PrescriptionPayload {
            medicine_name: self.medicine_name.clone(),
            dosage: self.dosage.clone(),
            instructions: self.instructions.clone(),
            prescribing_doctor: self.prescribing_doctor.clone(),
            doctor_specialty: self.doctor_specialty.clone(),
            hospital: self.hospital.clone(),
            prescription_date: self.prescription_date,
            attachment_url: self.attachment_url.clone(),
            attachment_type: self.attachment_type.clone(),
            is_active: self.is_active,
        }
    }
}
