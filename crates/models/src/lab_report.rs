//! Laboratory test reports.

use crate::dates::{self, date_or_today, optional_date, optional_date_time};
use crate::defaults::or_default;
use crate::Entity;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LabReport {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub test_type: String,
    #[serde(default, deserialize_with = "or_default")]
    pub lab_name: String,
    #[serde(default = "dates::today", with = "date_or_today")]
    pub test_date: NaiveDate,
    #[serde(default, deserialize_with = "or_default")]
    pub report_url: String,
    /// File type of the report (`pdf`, `jpg`, `png`).
    #[serde(default, deserialize_with = "or_default")]
    pub report_type: String,
    #[serde(default, deserialize_with = "or_default")]
    pub notes: String,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl LabReport {
    pub fn formatted_date(&self) -> String {
        dates::format_date(&self.test_date)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LabReportFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_date"
    )]
    pub test_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabReportPayload {
    pub test_type: String,
    pub lab_name: String,
    #[serde(with = "date_or_today")]
    pub test_date: NaiveDate,
    pub report_url: String,
    pub report_type: String,
    pub notes: String,
}

impl Entity for LabReport {
    const KIND: &'static str = "lab report";

    type Fields = LabReportFields;
    type Payload = LabReportPayload;

    fn to_payload(&self) -> LabReportPayload {
        LabReportPayload {
            test_type: self.test_type.clone(),
            lab_name: self.lab_name.clone(),
            test_date: self.test_date,
            report_url: self.report_url.clone(),
            report_type: self.report_type.clone(),
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_input_defaults_test_date_to_today() {
        let r = LabReport::from_wire(json!({})).expect("decode");
        assert_eq!(r.test_date, dates::today());
        assert_eq!(r.report_url, "");
        assert_eq!(r.formatted_date(), dates::format_date(&dates::today()));
    }

    #[test]
    fn blank_test_date_defaults_to_today() {
        let r = LabReport::from_wire(json!({ "test_date": "" })).expect("decode");
        assert_eq!(r.test_date, dates::today());
    }

    #[test]
    fn invalid_test_date_is_rejected() {
        let err = LabReport::from_wire(json!({ "test_date": "soon" })).expect_err("invalid");
        assert!(err.to_string().contains("test_date"), "{err}");
    }

    #[test]
    fn payload_reproduces_writable_subset() {
        let wire = json!({
            "id": "r1",
            "user_id": "u1",
            "test_type": "Full blood count",
            "lab_name": "Path Lab North",
            "test_date": "2024-02-10",
            "report_url": "https://files.example.org/fbc.pdf",
            "report_type": "pdf",
            "notes": "Fasting sample",
            "created_at": "2024-02-11T08:00:00Z",
            "updated_at": "2024-02-11T08:00:00Z"
        });
        let r = LabReport::from_wire(wire.clone()).expect("decode");
        let payload = serde_json::to_value(r.to_payload()).expect("serialize");

        let mut expected = wire;
        let map = expected.as_object_mut().expect("object");
        for server_only in ["id", "user_id", "created_at", "updated_at"] {
            map.remove(server_only);
        }
        assert_eq!(payload, expected);
    }
}
