//! Regular medications tracked against a pharmacy.

use crate::dates::{optional_date, optional_date_time};
use crate::defaults::{default_true, or_default, or_true};
use crate::Entity;
use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Days before `next_refill_date` at which a refill reminder is due, when unspecified.
pub const DEFAULT_REFILL_REMINDER_DAYS: i64 = 7;

fn default_refill_reminder_days() -> i64 {
    DEFAULT_REFILL_REMINDER_DAYS
}

/// A `null` falls back to the default; an explicit `0` is kept.
fn refill_reminder_days<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_REFILL_REMINDER_DAYS))
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Medication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub medicine_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub dosage: String,
    /// Free text such as "daily" or "twice daily".
    #[serde(default, deserialize_with = "or_default")]
    pub frequency: String,
    #[serde(default, deserialize_with = "or_default")]
    pub pharmacy_name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub pharmacy_phone: String,
    #[serde(default, deserialize_with = "or_default")]
    pub pharmacy_address: String,
    #[serde(default, with = "optional_date")]
    pub last_refill_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub next_refill_date: Option<NaiveDate>,
    #[serde(
        default = "default_refill_reminder_days",
        deserialize_with = "refill_reminder_days"
    )]
    pub refill_reminder_days: i64,
    #[serde(default = "default_true", deserialize_with = "or_true")]
    pub is_active: bool,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Medication {
    /// The date from which a refill reminder should be shown, if a next refill is scheduled.
    ///
    /// Negative reminder days count as zero. `None` when the window would start before the
    /// earliest representable date.
    pub fn refill_reminder_date(&self) -> Option<NaiveDate> {
        let days = u64::try_from(self.refill_reminder_days).unwrap_or(0);
        self.next_refill_date?.checked_sub_days(Days::new(days))
    }

    /// Whether an active medication is inside its refill reminder window on `today`.
    pub fn refill_due_on(&self, today: NaiveDate) -> bool {
        self.is_active && self.refill_reminder_date().is_some_and(|from| today >= from)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MedicationFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_address: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub last_refill_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub next_refill_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refill_reminder_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MedicationPayload {
    pub medicine_name: String,
    pub dosage: String,
    pub frequency: String,
    pub pharmacy_name: String,
    pub pharmacy_phone: String,
    pub pharmacy_address: String,
    #[serde(with = "optional_date")]
    pub last_refill_date: Option<NaiveDate>,
    #[serde(with = "optional_date")]
    pub next_refill_date: Option<NaiveDate>,
    pub refill_reminder_days: i64,
    pub is_active: bool,
}

impl Entity for Medication {
    const KIND: &'static str = "medication";

    type Fields = MedicationFields;
    type Payload = MedicationPayload;

    fn to_payload(&self) -> MedicationPayload {
        MedicationPayload {
            medicine_name: self.medicine_name.clone(),
            dosage: self.dosage.clone(),
            frequency: self.frequency.clone(),
            pharmacy_name: self.pharmacy_name.clone(),
            pharmacy_phone: self.pharmacy_phone.clone(),
            pharmacy_address: self.pharmacy_address.clone(),
            last_refill_date: self.last_refill_date,
            next_refill_date: self.next_refill_date,
            refill_reminder_days: self.refill_reminder_days,
            is_active: self.is_active,
        }
    }
}
