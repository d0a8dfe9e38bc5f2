//! Health check-up reminders.

use crate::dates::{self, optional_date_time};
use crate::defaults::{non_blank_or, or_default};
use crate::Entity;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_REMINDER_TYPE: &str = "checkup";

fn default_reminder_type() -> String {
    DEFAULT_REMINDER_TYPE.to_owned()
}

fn reminder_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    non_blank_or(deserializer, DEFAULT_REMINDER_TYPE)
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Reminder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, with = "optional_date_time")]
    pub reminder_date: Option<DateTime<FixedOffset>>,
    /// `checkup`, `vaccination`, `test` and so on.
    #[serde(default = "default_reminder_type", deserialize_with = "reminder_type")]
    pub reminder_type: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub is_recurring: bool,
    /// `monthly`, `quarterly`, `yearly`; empty for one-off reminders.
    #[serde(default, deserialize_with = "or_default")]
    pub recurrence_interval: String,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl Reminder {
    pub fn formatted_date(&self) -> String {
        self.reminder_date
            .as_ref()
            .map(dates::format_date_time)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ReminderFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date_time"
    )]
    pub reminder_date: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_interval: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub title: String,
    pub description: String,
    #[serde(with = "optional_date_time")]
    pub reminder_date: Option<DateTime<FixedOffset>>,
    pub reminder_type: String,
    pub is_completed: bool,
    pub is_recurring: bool,
    pub recurrence_interval: String,
}

impl Entity for Reminder {
    const KIND: &'static str = "reminder";

    type Fields = ReminderFields;
    type Payload = ReminderPayload;

    fn to_payload(&self) -> ReminderPayload {
        ReminderPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            reminder_date: self.reminder_date,
            reminder_type: self.reminder_type.clone(),
            is_completed: self.is_completed,
            is_recurring: self.is_recurring,
            recurrence_interval: self.recurrence_interval.clone(),
        }
    }
}
