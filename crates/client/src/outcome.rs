//! Uniform result shape for front ends: `{success, data?, total?, error?}`.

use crate::error::{ErrorKind, ServiceResult};
use crate::services::Page;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            error: None,
            error_kind: None,
        }
    }

    pub fn failure(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            error: Some(message.into()),
            error_kind: Some(kind),
        }
    }

    pub fn from_result(result: ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.message, err.kind),
        }
    }
}

impl<T> Outcome<Vec<T>> {
    pub fn from_page(result: ServiceResult<Page<T>>) -> Self {
        match result {
            Ok(page) => Self {
                total: page.total,
                ..Self::success(page.items)
            },
            Err(err) => Self::failure(err.message, err.kind),
        }
    }
}
