//! Health insurance policies.

use crate::dates::{optional_date, optional_date_time};
use crate::defaults::or_default;
use crate::Entity;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HealthInsurance {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub insurance_provider: String,
    #[serde(default, deserialize_with = "or_default")]
    pub policy_number: String,
    #[serde(default, deserialize_with = "or_default")]
    pub group_number: String,
    #[serde(default, deserialize_with = "or_default")]
    pub member_id: String,
    #[serde(default, with = "optional_date")]
    pub effective_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "or_default")]
    pub notes: String,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl HealthInsurance {
    /// Whether the policy has lapsed by `today`. A policy without an expiration date never lapses.
    pub fn is_lapsed_on(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_some_and(|end| today > end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HealthInsuranceFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub effective_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthInsurancePayload {
    pub insurance_provider: String,
    pub policy_number: String,
    pub group_number: String,
    pub member_id: String,
    #[serde(with = "optional_date")]
    pub effective_date: Option<NaiveDate>,
    #[serde(with = "optional_date")]
    pub expiration_date: Option<NaiveDate>,
    pub notes: String,
}

impl Entity for HealthInsurance {
    const KIND: &'static str = "insurance record";

    type Fields = HealthInsuranceFields;
    type Payload = HealthInsurancePayload;

    fn to_payload(&self) -> HealthInsurancePayload {
        HealthInsurancePayload {
            insurance_provider: self.insurance_provider.clone(),
            policy_number: self.policy_number.clone(),
            group_number: self.group_number.clone(),
            member_id: self.member_id.clone(),
            effective_date: self.effective_date,
            expiration_date: self.expiration_date,
            notes: self.notes.clone(),
        }
    }
}
