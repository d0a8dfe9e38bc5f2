//! In-memory doubles for unit tests.

use crate::error::{ApiError, ApiResult};
use crate::session::Navigator;
use crate::transport::{Method, RequestOptions, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.routes.lock().expect("navigator lock").push(route.to_owned());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub options: RequestOptions,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<ApiResult<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: ApiResult<Value>) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
        self
    }

    pub fn ok(self, body: Value) -> Self {
        self.respond(Ok(body))
    }

    pub fn server_error(self, status: u16, message: Option<&str>) -> Self {
        self.respond(Err(ApiError::Server {
            status,
            message: message.map(str::to_owned),
        }))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {calls:?}");
        calls.into_iter().next().expect("one call")
    }
}

impl Transport for FakeTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Value> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            method,
            path: path.to_owned(),
            options,
        });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".into())))
    }
}
