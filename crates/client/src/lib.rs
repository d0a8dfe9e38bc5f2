//! # PHR Client
//!
//! HTTP client for the patient health-records API.
//!
//! The crate is layered leaves first:
//! - [`transport`]: the one configured HTTP client. Every request carries the session's bearer
//!   token, and an HTTP 401 on any call clears the session and sends the user to `/login`.
//! - [`services`]: stateless per-family services (prescriptions, appointments, sharing and so
//!   on) that call the transport, decode through `phr_models` and normalise every failure into a
//!   [`ServiceError`] with a user-facing message.
//! - [`outcome`]: the serialisable `{success, data | error, total?}` shape used by front ends.
//!
//! Configuration is resolved once at startup into a [`ClientConfig`] and passed in; nothing in
//! this crate reads the process environment while handling a request.

pub mod config;
pub mod error;
pub mod outcome;
pub mod services;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use error::{ApiError, ApiResult, ErrorKind, ServiceError, ServiceResult};
pub use outcome::Outcome;
pub use services::{
    AppointmentService, AuthService, DashboardService, InsuranceService, LabReportService,
    MedicationService, Page, PrescriptionService, ReminderService, SharingService,
};
pub use session::{Navigator, Session, SessionError, SessionResult, LOGIN_ROUTE};
pub use transport::{HttpTransport, Method, RequestOptions, Transport};
