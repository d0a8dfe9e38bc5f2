//! Stateless API services, one per record family.
//!
//! Every operation returns a [`ServiceResult`]. Failures never escape as transport errors: they
//! are converted with the operation's default message, which the server's own `error` text
//! replaces when present.

mod appointments;
mod auth;
mod dashboard;
mod insurance;
mod lab_reports;
mod medications;
mod prescriptions;
mod reminders;
mod sharing;

pub use appointments::AppointmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use insurance::InsuranceService;
pub use lab_reports::LabReportService;
pub use medications::MedicationService;
pub use prescriptions::PrescriptionService;
pub use reminders::{ReminderService, DEFAULT_UPCOMING_DAYS};
pub use sharing::SharingService;

use crate::error::{ServiceError, ServiceResult};
use crate::transport::{Method, RequestOptions, Transport};
use phr_models::{decode, Acknowledgement, Entity, ListEnvelope, RecordId};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// One page of a paginated list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching records on the server, when the endpoint reports it.
    pub total: Option<u64>,
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        Self {
            items: envelope.data,
            total: envelope.total,
        }
    }
}

/// Default failure messages for the standard operations on one family.
#[derive(Clone, Copy, Debug)]
pub struct Messages {
    pub fetch_all: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// A record family served under one REST collection.
pub trait Resource: Entity {
    /// Collection path, for example `/prescriptions`.
    const PATH: &'static str;
    const MESSAGES: Messages;
}

/// Validate an identifier before interpolating it into a path.
pub(crate) fn record_id(id: &str, message: &str) -> ServiceResult<RecordId> {
    RecordId::parse(id).map_err(|e| {
        tracing::debug!("rejected record id {id:?}: {e}");
        ServiceError::invalid(message)
    })
}

pub(crate) fn to_body<B: Serialize>(body: &B, message: &str) -> ServiceResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        tracing::error!("failed to serialize request body: {e}");
        ServiceError::invalid(message)
    })
}

/// Send one request and decode the response as `R`.
pub(crate) async fn call<T, R>(
    transport: &T,
    method: Method,
    path: &str,
    options: RequestOptions,
    kind: &str,
    message: &str,
) -> ServiceResult<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    let value = transport
        .request(method, path, options)
        .await
        .map_err(|e| ServiceError::from_api(e, message))?;
    decode(kind, value).map_err(|e| ServiceError::decode(e, message))
}

/// Send a mutation whose response is `{"message": ...}`. An empty body counts as success.
pub(crate) async fn acknowledge<T: Transport>(
    transport: &T,
    method: Method,
    path: &str,
    options: RequestOptions,
    message: &str,
) -> ServiceResult<Acknowledgement> {
    let value = transport
        .request(method, path, options)
        .await
        .map_err(|e| ServiceError::from_api(e, message))?;
    if value.is_null() {
        return Ok(Acknowledgement::default());
    }
    decode("acknowledgement", value).map_err(|e| ServiceError::decode(e, message))
}

/// Create, update and delete for any [`Resource`], plus list helpers for the per-family
/// services built on it.
pub struct Records<E, T> {
    transport: Arc<T>,
    entity: PhantomData<fn() -> E>,
}

impl<E, T> Clone for Records<E, T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            entity: PhantomData,
        }
    }
}

impl<E: Resource, T: Transport> Records<E, T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            entity: PhantomData,
        }
    }

    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", E::PATH, id)
    }

    pub(crate) async fn list_at(
        &self,
        path: &str,
        options: RequestOptions,
        message: &str,
    ) -> ServiceResult<Page<E>> {
        let envelope: ListEnvelope<E> = call(
            self.transport.as_ref(),
            Method::Get,
            path,
            options,
            E::KIND,
            message,
        )
        .await?;
        Ok(envelope.into())
    }

    pub(crate) async fn list(&self, options: RequestOptions) -> ServiceResult<Page<E>> {
        self.list_at(E::PATH, options, E::MESSAGES.fetch_all).await
    }

    pub(crate) async fn fetch_one(&self, id: &str, message: &str) -> ServiceResult<E> {
        let id = record_id(id, message)?;
        call(
            self.transport.as_ref(),
            Method::Get,
            &Self::item_path(&id),
            RequestOptions::new(),
            E::KIND,
            message,
        )
        .await
    }

    /// Create a record from user-entered fields.
    ///
    /// Unset fields take the family's documented defaults before the payload is built, so the
    /// server always receives the complete writable shape.
    ///
    /// # Returns
    ///
    /// The record as stored by the server, including its assigned `id`.
    pub async fn create(&self, fields: &E::Fields) -> ServiceResult<E> {
        let message = E::MESSAGES.create;
        let model = E::from_fields(fields).map_err(|e| {
            tracing::error!(error = %e, operation = message, "form fields did not build a record");
            ServiceError::invalid(message)
        })?;
        let body = to_body(&model.to_payload(), message)?;
        call(
            self.transport.as_ref(),
            Method::Post,
            E::PATH,
            RequestOptions::new().body(body),
            E::KIND,
            message,
        )
        .await
    }

    /// Send only the fields set in `changes`.
    pub async fn update(&self, id: &str, changes: &E::Fields) -> ServiceResult<Acknowledgement> {
        let message = E::MESSAGES.update;
        let id = record_id(id, message)?;
        let body = to_body(changes, message)?;
        acknowledge(
            self.transport.as_ref(),
            Method::Put,
            &Self::item_path(&id),
            RequestOptions::new().body(body),
            message,
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let message = E::MESSAGES.delete;
        let id = record_id(id, message)?;
        self.transport
            .request(Method::Delete, &Self::item_path(&id), RequestOptions::new())
            .await
            .map_err(|e| ServiceError::from_api(e, message))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeTransport;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Dose {
        count: u32,
    }

    #[derive(Default, Serialize)]
    struct DoseFields {
        count: Option<String>,
    }

    impl Entity for Dose {
        const KIND: &'static str = "dose";
        type Fields = DoseFields;
        type Payload = u32;

        fn to_payload(&self) -> u32 {
            self.count
        }
    }

    impl Resource for Dose {
        const PATH: &'static str = "/doses";
        const MESSAGES: Messages = Messages {
            fetch_all: "Failed to fetch doses",
            create: "Failed to create dose",
            update: "Failed to update dose",
            delete: "Failed to delete dose",
        };
    }

    #[tokio::test]
    async fn create_with_unusable_fields_reports_default_message_and_sends_nothing() {
        let fake = Arc::new(FakeTransport::new());
        let fields = DoseFields {
            count: Some("many".into()),
        };
        let err = Records::<Dose, FakeTransport>::new(fake.clone())
            .create(&fields)
            .await
            .expect_err("fields do not decode");
        assert_eq!(err.kind, ErrorKind::Invalid);
        assert_eq!(err.message, "Failed to create dose");
        assert!(fake.calls().is_empty());
    }
}
