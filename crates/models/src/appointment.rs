//! Medical appointments.

use crate::dates::{self, optional_date_time};
use crate::defaults::or_default;
use crate::Entity;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Appointment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub doctor_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub specialty: String,
    #[serde(default, deserialize_with = "or_default")]
    pub hospital: String,
    #[serde(default, deserialize_with = "or_default")]
    pub location: String,
    #[serde(default, with = "optional_date_time")]
    pub appointment_date: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "or_default")]
    pub notes: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_completed: bool,
    /// Set by the backend once it has sent a reminder; never written by the client.
    #[serde(default, deserialize_with = "or_default")]
    pub reminder_sent: bool,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Appointment {
    /// Display form of the appointment time, or an empty string when no time is set.
    pub fn formatted_date(&self) -> String {
        self.appointment_date
            .as_ref()
            .map(dates::format_date_time)
            .unwrap_or_default()
    }

    /// Whether the appointment is still ahead of `now` and not completed.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed
            && self
                .appointment_date
                .is_some_and(|at| at.with_timezone(&Utc) > now)
    }

    pub fn is_upcoming(&self) -> bool {
        self.is_upcoming_at(Utc::now())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AppointmentFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date_time"
    )]
    pub appointment_date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub doctor_name: String,
    pub specialty: String,
    pub hospital: String,
    pub location: String,
    #[serde(with = "optional_date_time")]
    pub appointment_date: Option<DateTime<FixedOffset>>,
    pub notes: String,
    pub is_completed: bool,
}

impl Entity for Appointment {
    const KIND: &'static str = "appointment";

    type Fields = AppointmentFields;
    type Payload = AppointmentPayload;

    fn to_payload(&self) -> AppointmentPayload {
        AppointmentPayload {
            doctor_name: self.doctor_name.clone(),
            specialty: self.specialty.clone(),
            hospital: self.hospital.clone(),
            location: self.location.clone(),
            appointment_date: self.appointment_date,
            notes: self.notes.clone(),
            is_completed: self.is_completed,
        }
    }
}
