//! Share links: time- and count-limited grants of read access to other records.
//!
//! A [`SharedRecord`] describes access to one or more records; it is never a copy of them.
//! The backend enforces the lifecycle:
//!
//! - **Active**: created, not expired, access count below the limit
//! - **Expired**: the clock passed `expires_at`
//! - **AccessExhausted**: `current_access_count` reached a positive `max_access_count`
//! - **Revoked**: the owner revoked it (`is_active = false`)
//!
//! All three end states are terminal. The wire only carries `is_active` plus the raw counters and
//! expiry, so the client derives [`ShareState`] from them.

use crate::dates::optional_date_time;
use crate::defaults::{default_true, or_default, or_true};
use crate::{decode, Appointment, LabReport, ModelError, ModelResult, Prescription};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Split a comma-separated identifier list, trimming whitespace and dropping empty tokens.
///
/// `"a, b ,,c"` yields `["a", "b", "c"]`.
pub fn parse_record_ids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Record identifiers as they arrive from a form or from the server.
///
/// The backend stores the list as a JSON array encoded in a string, forms supply a
/// comma-separated string, and API callers may pass a real list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RecordIdsInput {
    List(Vec<String>),
    Text(String),
}

impl RecordIdsInput {
    /// The identifiers with whitespace trimmed and empty entries removed.
    pub fn normalise(&self) -> Vec<String> {
        match self {
            Self::List(ids) => ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::Text(text) => {
                let text = text.trim();
                if let Some(inner) = text.strip_prefix('[') {
                    if let Ok(ids) = serde_json::from_str::<Vec<String>>(text) {
                        return Self::List(ids).normalise();
                    }
                    return parse_record_ids(inner.strip_suffix(']').unwrap_or(inner));
                }
                parse_record_ids(text)
            }
        }
    }
}

impl From<&str> for RecordIdsInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<String>> for RecordIdsInput {
    fn from(ids: Vec<String>) -> Self {
        Self::List(ids)
    }
}

fn record_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RecordIdsInput>::deserialize(deserializer)?
        .map(|input| input.normalise())
        .unwrap_or_default())
}

/// Which kind of record a share link grants access to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    #[default]
    Prescription,
    Appointment,
    LabReport,
    /// Any mix of prescriptions, appointments and lab reports.
    Bundle,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prescription => "prescription",
            Self::Appointment => "appointment",
            Self::LabReport => "lab_report",
            Self::Bundle => "bundle",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "prescription" => Ok(Self::Prescription),
            "appointment" => Ok(Self::Appointment),
            "lab_report" => Ok(Self::LabReport),
            "bundle" => Ok(Self::Bundle),
            other => Err(ModelError::InvalidInput(format!(
                "unknown record type '{other}' (expected prescription, appointment, lab_report or bundle)"
            ))),
        }
    }
}

/// How the share link is delivered to the recipient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMethod {
    #[default]
    Link,
    Email,
    Sms,
}

impl ShareMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }
}

impl fmt::Display for ShareMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "link" => Ok(Self::Link),
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            other => Err(ModelError::InvalidInput(format!(
                "unknown share method '{other}' (expected link, email or sms)"
            ))),
        }
    }
}

/// Observable state of a share link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareState {
    Active,
    Expired,
    AccessExhausted,
    Revoked,
}

impl ShareState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for ShareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::AccessExhausted => "access limit reached",
            Self::Revoked => "revoked",
        })
    }
}

/// One audit entry for an access through a share link.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccessLogEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub ip_address: String,
    #[serde(default, deserialize_with = "or_default")]
    pub user_agent: String,
    #[serde(default, with = "optional_date_time")]
    pub accessed_at: Option<DateTime<FixedOffset>>,
    /// `viewed` or `downloaded`.
    #[serde(default, deserialize_with = "or_default")]
    pub action: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SharedRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub share_token: String,
    #[serde(default, deserialize_with = "or_default")]
    pub record_type: String,
    #[serde(default, deserialize_with = "record_ids")]
    pub record_ids: Vec<String>,
    #[serde(default, with = "optional_date_time")]
    pub expires_at: Option<DateTime<FixedOffset>>,
    /// Zero or less means unlimited.
    #[serde(default, deserialize_with = "or_default")]
    pub max_access_count: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub current_access_count: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub allow_download: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub recipient_email: String,
    #[serde(default, deserialize_with = "or_default")]
    pub recipient_phone: String,
    #[serde(default, deserialize_with = "or_default")]
    pub share_method: String,
    #[serde(default = "default_true", deserialize_with = "or_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub access_logs: Vec<AccessLogEntry>,
    #[serde(default, with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "optional_date_time")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl SharedRecord {
    /// Path of the public share page, or an empty string when there is no token.
    pub fn share_path(&self) -> String {
        if self.share_token.is_empty() {
            return String::new();
        }
        format!("/share/{}", self.share_token)
    }

    /// Absolute share URL under `origin`, or an empty string when there is no token.
    pub fn share_url(&self, origin: &str) -> String {
        if self.share_token.is_empty() {
            return String::new();
        }
        format!("{}{}", origin.trim_end_matches('/'), self.share_path())
    }

    /// `false` when no expiry is set; otherwise `true` exactly when `now` is past `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|expires| now > expires.with_timezone(&Utc))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// `false` for unlimited links; otherwise `true` once the access count reaches the limit.
    pub fn access_limit_reached(&self) -> bool {
        if self.max_access_count <= 0 {
            return false;
        }
        self.current_access_count >= self.max_access_count
    }

    /// Accesses left before the limit, or `None` for unlimited links.
    pub fn remaining_accesses(&self) -> Option<i64> {
        (self.max_access_count > 0).then(|| {
            self.max_access_count
                .saturating_sub(self.current_access_count.max(0))
                .max(0)
        })
    }

    /// Derived lifecycle state. Revocation wins over expiry, which wins over exhaustion.
    pub fn state_at(&self, now: DateTime<Utc>) -> ShareState {
        if !self.is_active {
            ShareState::Revoked
        } else if self.is_expired_at(now) {
            ShareState::Expired
        } else if self.access_limit_reached() {
            ShareState::AccessExhausted
        } else {
            ShareState::Active
        }
    }

    pub fn state(&self) -> ShareState {
        self.state_at(Utc::now())
    }
}

/// Form values for a new share link.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub record_type: RecordType,
    pub record_ids: RecordIdsInput,
    #[serde(default = "ShareRequest::default_expires_in_hours")]
    pub expires_in_hours: u32,
    #[serde(default)]
    pub max_access_count: u32,
    #[serde(default)]
    pub allow_download: bool,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub recipient_phone: Option<String>,
    #[serde(default)]
    pub share_method: ShareMethod,
}

impl ShareRequest {
    pub const DEFAULT_EXPIRES_IN_HOURS: u32 = 24;

    fn default_expires_in_hours() -> u32 {
        Self::DEFAULT_EXPIRES_IN_HOURS
    }

    /// A link-method request for `record_ids` with every other field at its form default.
    pub fn new(record_type: RecordType, record_ids: impl Into<RecordIdsInput>) -> Self {
        Self {
            record_type,
            record_ids: record_ids.into(),
            expires_in_hours: Self::DEFAULT_EXPIRES_IN_HOURS,
            max_access_count: 0,
            allow_download: false,
            recipient_email: None,
            recipient_phone: None,
            share_method: ShareMethod::Link,
        }
    }

    /// The wire body for `POST /sharing/create`, with the identifier list normalised.
    pub fn to_payload(&self) -> SharePayload {
        SharePayload {
            record_type: self.record_type,
            record_ids: self.record_ids.normalise(),
            expires_in_hours: self.expires_in_hours,
            max_access_count: self.max_access_count,
            allow_download: self.allow_download,
            recipient_email: self.recipient_email.clone().unwrap_or_default(),
            recipient_phone: self.recipient_phone.clone().unwrap_or_default(),
            share_method: self.share_method,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub record_type: RecordType,
    pub record_ids: Vec<String>,
    pub expires_in_hours: u32,
    pub max_access_count: u32,
    pub allow_download: bool,
    pub recipient_email: String,
    pub recipient_phone: String,
    pub share_method: ShareMethod,
}

/// A newly created share link together with the URL to hand to the recipient.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreatedShare {
    pub shared_record: SharedRecord,
    pub share_url: String,
}

#[derive(Deserialize)]
struct CreatedShareWire {
    shared_record: SharedRecord,
    #[serde(default, deserialize_with = "or_default")]
    share_url: String,
}

impl CreatedShare {
    /// Decode a create response.
    ///
    /// The backend returns the share URL as a path relative to the web origin. Relative paths
    /// are resolved against `origin`; when the server omits the URL it is composed from the
    /// record's token.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Translation`] if the body has no decodable `shared_record`.
    pub fn from_wire(value: serde_json::Value, origin: &str) -> ModelResult<Self> {
        let wire: CreatedShareWire = decode("share link", value)?;
        let share_url = if wire.share_url.is_empty() {
            wire.shared_record.share_url(origin)
        } else if wire.share_url.starts_with('/') {
            format!("{}{}", origin.trim_end_matches('/'), wire.share_url)
        } else {
            wire.share_url
        };
        Ok(Self {
            shared_record: wire.shared_record,
            share_url,
        })
    }
}

/// Records reachable through a share token, typed by the link's record type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SharedRecords {
    Prescriptions(Vec<Prescription>),
    Appointments(Vec<Appointment>),
    LabReports(Vec<LabReport>),
    Bundle {
        prescriptions: Vec<Prescription>,
        appointments: Vec<Appointment>,
        lab_reports: Vec<LabReport>,
    },
}

impl SharedRecords {
    pub fn len(&self) -> usize {
        match self {
            Self::Prescriptions(items) => items.len(),
            Self::Appointments(items) => items.len(),
            Self::LabReports(items) => items.len(),
            Self::Bundle {
                prescriptions,
                appointments,
                lab_reports,
            } => prescriptions.len() + appointments.len() + lab_reports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
struct BundleWire {
    #[serde(default, deserialize_with = "or_default")]
    prescriptions: Vec<Prescription>,
    #[serde(default, deserialize_with = "or_default")]
    appointments: Vec<Appointment>,
    #[serde(default, deserialize_with = "or_default")]
    lab_reports: Vec<LabReport>,
}

/// What a recipient sees when opening a share token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SharedAccess {
    pub shared_record: SharedRecord,
    pub records: SharedRecords,
    pub allow_download: bool,
}

#[derive(Deserialize)]
struct SharedAccessWire {
    shared_record: SharedRecord,
    #[serde(default)]
    records: serde_json::Value,
    #[serde(default, deserialize_with = "or_default")]
    allow_download: bool,
}

fn decode_list<T: serde::de::DeserializeOwned>(
    kind: &str,
    value: serde_json::Value,
) -> ModelResult<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    decode(kind, value)
}

impl SharedAccess {
    /// Decode the public share response, typing `records` by the link's record type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Translation`] if the body does not match, or
    /// [`ModelError::InvalidInput`] if the record type is unknown.
    pub fn from_wire(value: serde_json::Value) -> ModelResult<Self> {
        let wire: SharedAccessWire = decode("shared access", value)?;
        let record_type: RecordType = wire.shared_record.record_type.parse()?;
        let records = match record_type {
            RecordType::Prescription => {
                SharedRecords::Prescriptions(decode_list("shared prescriptions", wire.records)?)
            }
            RecordType::Appointment => {
                SharedRecords::Appointments(decode_list("shared appointments", wire.records)?)
            }
            RecordType::LabReport => {
                SharedRecords::LabReports(decode_list("shared lab reports", wire.records)?)
            }
            RecordType::Bundle => {
                let bundle: BundleWire = if wire.records.is_null() {
                    decode("shared bundle", serde_json::json!({}))?
                } else {
                    decode("shared bundle", wire.records)?
                };
                SharedRecords::Bundle {
                    prescriptions: bundle.prescriptions,
                    appointments: bundle.appointments,
                    lab_reports: bundle.lab_reports,
                }
            }
        };
        Ok(Self {
            shared_record: wire.shared_record,
            records,
            allow_download: wire.allow_download,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_date_time;
    use serde_json::json;

    fn at(text: &str) -> DateTime<Utc> {
        parse_date_time(text).expect("timestamp").with_timezone(&Utc)
    }

    fn shared(value: serde_json::Value) -> SharedRecord {
        decode("shared record", value).expect("decode shared record")
    }

    #[test]
    fn parse_record_ids_trims_and_drops_empty() {
        assert_eq!(parse_record_ids("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_record_ids(" , ,").is_empty());
    }

    #[test]
    fn record_ids_input_accepts_json_array_text() {
        let input = RecordIdsInput::from(r#"["x1", " x2 ", ""]"#);
        assert_eq!(input.normalise(), vec!["x1", "x2"]);
    }

    #[test]
    fn record_ids_input_normalises_lists() {
        let input = RecordIdsInput::from(vec![" a ".to_owned(), String::new(), "b".to_owned()]);
        assert_eq!(input.normalise(), vec!["a", "b"]);
    }

    #[test]
    fn empty_input_yields_defaults() {
        let s = shared(json!({}));
        assert_eq!(s.share_token, "");
        assert!(s.record_ids.is_empty());
        assert_eq!(s.max_access_count, 0);
        assert_eq!(s.current_access_count, 0);
        assert!(!s.allow_download);
        assert!(s.is_active);
        assert!(s.access_logs.is_empty());
        assert_eq!(s.share_url("http://localhost:3000"), "");
        assert!(!s.is_expired());
        assert!(!s.access_limit_reached());
        assert_eq!(s.state(), ShareState::Active);
    }

    #[test]
    fn decodes_record_ids_stored_as_json_text() {
        let s = shared(json!({ "record_ids": "[\"p1\",\"p2\"]" }));
        assert_eq!(s.record_ids, vec!["p1", "p2"]);
    }

    #[test]
    fn share_url_composes_origin_and_token() {
        let s = shared(json!({ "share_token": "tok-123" }));
        assert_eq!(
            s.share_url("https://records.example.org/"),
            "https://records.example.org/share/tok-123"
        );
    }

    #[test]
    fn access_limit_zero_means_unlimited() {
        let s = shared(json!({ "max_access_count": 0, "current_access_count": 500 }));
        assert!(!s.access_limit_reached());
        assert_eq!(s.remaining_accesses(), None);
    }

    #[test]
    fn negative_counts_decode_and_mean_unlimited() {
        let s = shared(json!({ "max_access_count": -1, "current_access_count": -3 }));
        assert_eq!(s.max_access_count, -1);
        assert!(!s.access_limit_reached());
        assert_eq!(s.remaining_accesses(), None);
        assert_eq!(s.state(), ShareState::Active);

        let limited = shared(json!({ "max_access_count": 2, "current_access_count": -3 }));
        assert_eq!(limited.remaining_accesses(), Some(2));
    }

    #[test]
    fn bracketed_text_that_is_not_json_is_split_without_brackets() {
        let input = RecordIdsInput::from("[a, b]");
        assert_eq!(input.normalise(), vec!["a", "b"]);
        assert_eq!(RecordIdsInput::from("[ c ").normalise(), vec!["c"]);
    }

    #[test]
    fn access_limit_reached_exactly_at_max() {
        let below = shared(json!({ "max_access_count": 3, "current_access_count": 2 }));
        assert!(!below.access_limit_reached());
        assert_eq!(below.remaining_accesses(), Some(1));

        let at_max = shared(json!({ "max_access_count": 3, "current_access_count": 3 }));
        assert!(at_max.access_limit_reached());

        let over = shared(json!({ "max_access_count": 3, "current_access_count": 4 }));
        assert!(over.access_limit_reached());
        assert_eq!(over.remaining_accesses(), Some(0));
    }

    #[test]
    fn expiry_is_strictly_after_expires_at() {
        let s = shared(json!({ "expires_at": "2024-05-01T12:00:00Z" }));
        assert!(!s.is_expired_at(at("2024-05-01T11:59:59Z")));
        assert!(!s.is_expired_at(at("2024-05-01T12:00:00Z")));
        assert!(s.is_expired_at(at("2024-05-01T12:00:01Z")));
    }

    #[test]
    fn state_precedence() {
        let now = at("2024-06-01T00:00:00Z");
        let expired_and_exhausted = json!({
            "expires_at": "2024-05-01T00:00:00Z",
            "max_access_count": 1,
            "current_access_count": 1
        });
        assert_eq!(shared(expired_and_exhausted.clone()).state_at(now), ShareState::Expired);

        let mut revoked = expired_and_exhausted;
        revoked["is_active"] = json!(false);
        assert_eq!(shared(revoked).state_at(now), ShareState::Revoked);

        let exhausted = json!({ "max_access_count": 2, "current_access_count": 2 });
        let state = shared(exhausted).state_at(now);
        assert_eq!(state, ShareState::AccessExhausted);
        assert!(state.is_terminal());
    }

    #[test]
    fn share_request_payload_normalises_ids() {
        let mut request = ShareRequest::new(RecordType::Bundle, "a, b ,,c");
        request.allow_download = true;
        let body = serde_json::to_value(request.to_payload()).expect("serialize");
        assert_eq!(
            body,
            json!({
                "record_type": "bundle",
                "record_ids": ["a", "b", "c"],
                "expires_in_hours": 24,
                "max_access_count": 0,
                "allow_download": true,
                "recipient_email": "",
                "recipient_phone": "",
                "share_method": "link"
            })
        );
    }

    #[test]
    fn record_type_parses_cli_spellings() {
        assert_eq!("lab-report".parse::<RecordType>().expect("parse"), RecordType::LabReport);
        assert_eq!("Bundle".parse::<RecordType>().expect("parse"), RecordType::Bundle);
        assert!("scan".parse::<RecordType>().is_err());
        assert_eq!("SMS".parse::<ShareMethod>().expect("parse"), ShareMethod::Sms);
    }

    #[test]
    fn created_share_resolves_relative_url() {
        let created = CreatedShare::from_wire(
            json!({
                "shared_record": { "id": "s1", "share_token": "tok" },
                "share_url": "/share/tok"
            }),
            "http://localhost:3000",
        )
        .expect("decode");
        assert_eq!(created.share_url, "http://localhost:3000/share/tok");
        assert_eq!(created.shared_record.id.as_deref(), Some("s1"));
    }

    #[test]
    fn created_share_composes_url_when_missing() {
        let created = CreatedShare::from_wire(
            json!({ "shared_record": { "share_token": "abc" } }),
            "https://app.example.org",
        )
        .expect("decode");
        assert_eq!(created.share_url, "https://app.example.org/share/abc");
    }

    #[test]
    fn shared_access_types_records_by_kind() {
        let access = SharedAccess::from_wire(json!({
            "shared_record": { "record_type": "prescription", "allow_download": true },
            "records": [{ "medicine_name": "Atorvastatin" }],
            "allow_download": true
        }))
        .expect("decode");
        assert!(access.allow_download);
        match access.records {
            SharedRecords::Prescriptions(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].medicine_name, "Atorvastatin");
            }
            other => panic!("expected prescriptions, got {other:?}"),
        }
    }

    #[test]
    fn shared_access_decodes_bundles() {
        let access = SharedAccess::from_wire(json!({
            "shared_record": { "record_type": "bundle" },
            "records": {
                "prescriptions": null,
                "appointments": [{ "doctor_name": "Dr. Lee" }],
                "lab_reports": [{ "test_type": "HbA1c" }, { "test_type": "Lipids" }]
            }
        }))
        .expect("decode");
        assert_eq!(access.records.len(), 3);
        assert!(!access.allow_download);
    }

    #[test]
    fn shared_access_rejects_unknown_record_type() {
        let err = SharedAccess::from_wire(json!({
            "shared_record": { "record_type": "x-ray" },
            "records": []
        }))
        .expect_err("unknown type");
        assert!(matches!(err, ModelError::InvalidInput(_)));
    }
}
