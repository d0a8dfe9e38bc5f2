//! Field-level fallbacks used by the `#[serde(deserialize_with = ...)]` attributes.
//!
//! `#[serde(default)]` only covers a missing key. These helpers additionally map an explicit
//! JSON `null` onto the documented default, which is how the backend encodes empty pointers and
//! nil slices.

use serde::{Deserialize, Deserializer};

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn default_true() -> bool {
    true
}

/// `true` for null, otherwise the value as sent. An explicit `false` is kept.
pub(crate) fn or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// The given text, or `fallback` when the value is null or blank.
pub(crate) fn non_blank_or<'de, D>(deserializer: D, fallback: &str) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned()))
}
