//! Account holder and authentication payloads.

use crate::dates::{optional_date, optional_date_time};
use crate::defaults::{non_blank_or, or_default};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_ROLE: &str = "patient";

fn role<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    non_blank_or(deserializer, DEFAULT_ROLE)
}

fn default_role() -> String {
    DEFAULT_ROLE.to_owned()
}

/// Wire shape. Older clients sent camelCase names, so both spellings are read.
#[derive(Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    email: String,
    #[serde(default, deserialize_with = "or_default")]
    phone: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default, rename = "firstName")]
    first_name_camel: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default, rename = "lastName")]
    last_name_camel: Option<String>,
    #[serde(default, with = "optional_date")]
    date_of_birth: Option<NaiveDate>,
    #[serde(default = "default_role", deserialize_with = "role")]
    role: String,
    #[serde(default, deserialize_with = "or_default")]
    is_email_verified: bool,
    #[serde(default, deserialize_with = "or_default")]
    is_phone_verified: bool,
    #[serde(default, with = "optional_date_time")]
    created_at: Option<DateTime<FixedOffset>>,
}

fn either(primary: Option<String>, fallback: Option<String>) -> String {
    primary
        .filter(|s| !s.is_empty())
        .or(fallback)
        .unwrap_or_default()
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire.id,
            email: wire.email,
            phone: wire.phone,
            first_name: either(wire.first_name, wire.first_name_camel),
            last_name: either(wire.last_name, wire.last_name_camel),
            date_of_birth: wire.date_of_birth,
            role: wire.role,
            is_email_verified: wire.is_email_verified,
            is_phone_verified: wire.is_phone_verified,
            created_at: wire.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(from = "UserWire")]
pub struct User {
    pub id: Option<String>,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    /// `patient`, `doctor` or `caregiver`.
    pub role: String,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    #[serde(with = "optional_date_time")]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Body returned by login and register.
#[derive(Clone, Deserialize)]
pub struct AuthSession {
    #[serde(default, deserialize_with = "or_default")]
    pub message: String,
    pub user: User,
    pub token: String,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("message", &self.message)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Body returned by the profile endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub user: User,
}
