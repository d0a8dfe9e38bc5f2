//! Share links over a user's records.
//!
//! Revoking is a state change on the server (`is_active` becomes `false`); the share record
//! stays in the owner's list.

use super::{acknowledge, call, record_id, to_body};
use crate::error::{ServiceError, ServiceResult};
use crate::transport::{Method, RequestOptions, Transport};
use phr_models::{CreatedShare, ListEnvelope, SharedAccess, SharedRecord, ShareRequest};
use std::sync::Arc;

const FETCH_MY_SHARES: &str = "Failed to fetch shared records";
const CREATE: &str = "Failed to create share link";
const REVOKE: &str = "Failed to revoke share link";
const OPEN: &str = "Failed to open shared record";

pub struct SharingService<T> {
    transport: Arc<T>,
    app_origin: String,
}

impl<T> Clone for SharingService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            app_origin: self.app_origin.clone(),
        }
    }
}

impl<T: Transport> SharingService<T> {
    /// `app_origin` is the web origin share URLs are composed under.
    pub fn new(transport: Arc<T>, app_origin: impl Into<String>) -> Self {
        Self {
            transport,
            app_origin: app_origin.into(),
        }
    }

    pub async fn fetch_my_shares(&self) -> ServiceResult<Vec<SharedRecord>> {
        let envelope: ListEnvelope<SharedRecord> = call(
            self.transport.as_ref(),
            Method::Get,
            "/sharing/my-shares",
            RequestOptions::new(),
            "shared record list",
            FETCH_MY_SHARES,
        )
        .await?;
        Ok(envelope.data)
    }

    /// Create a share link. The identifier list is normalised before submission.
    ///
    /// # Returns
    ///
    /// The created share record and its absolute URL.
    ///
    /// # Errors
    ///
    /// Fails locally with the default message when no identifiers remain after normalisation.
    pub async fn create_share_link(&self, request: &ShareRequest) -> ServiceResult<CreatedShare> {
        let payload = request.to_payload();
        if payload.record_ids.is_empty() {
            return Err(ServiceError::invalid(CREATE));
        }
        let body = to_body(&payload, CREATE)?;
        let value = self
            .transport
            .request(
                Method::Post,
                "/sharing/create",
                RequestOptions::new().body(body),
            )
            .await
            .map_err(|e| ServiceError::from_api(e, CREATE))?;
        CreatedShare::from_wire(value, &self.app_origin).map_err(|e| ServiceError::decode(e, CREATE))
    }

    pub async fn revoke_share_link(&self, id: &str) -> ServiceResult<()> {
        let id = record_id(id, REVOKE)?;
        acknowledge(
            self.transport.as_ref(),
            Method::Post,
            &format!("/sharing/{id}/revoke"),
            RequestOptions::new(),
            REVOKE,
        )
        .await?;
        Ok(())
    }

    /// Open a share token as its recipient would.
    pub async fn open_shared(&self, token: &str) -> ServiceResult<SharedAccess> {
        let token = record_id(token, OPEN)?;
        let value = self
            .transport
            .request(
                Method::Get,
                &format!("/share/{token}"),
                RequestOptions::new(),
            )
            .await
            .map_err(|e| ServiceError::from_api(e, OPEN))?;
        SharedAccess::from_wire(value).map_err(|e| ServiceError::decode(e, OPEN))
    }

    pub fn app_origin(&self) -> &str {
        &self.app_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeTransport;
    use phr_models::{RecordType, ShareMethod, ShareState, SharedRecords};
    use serde_json::json;

    const ORIGIN: &str = "http://localhost:3000";

    #[tokio::test]
    async fn create_normalises_ids_and_surfaces_url() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "shared_record": {
                "id": "s1",
                "share_token": "abc123",
                "record_type": "prescription",
                "record_ids": "[\"a\",\"b\",\"c\"]",
                "expires_at": "2099-01-01T00:00:00Z"
            },
            "share_url": "/share/abc123"
        })));
        let mut request = ShareRequest::new(RecordType::Prescription, "a, b ,,c");
        request.share_method = ShareMethod::Email;
        request.recipient_email = Some("gp@example.org".into());

        let created = SharingService::new(fake.clone(), ORIGIN)
            .create_share_link(&request)
            .await
            .expect("created");
        assert_eq!(created.share_url, "http://localhost:3000/share/abc123");
        assert_eq!(created.shared_record.record_ids, vec!["a", "b", "c"]);
        assert_eq!(created.shared_record.state(), ShareState::Active);

        let call = fake.only_call();
        assert_eq!(call.path, "/sharing/create");
        let body = call.options.body.expect("body");
        assert_eq!(body["record_ids"], json!(["a", "b", "c"]));
        assert_eq!(body["share_method"], "email");
        assert_eq!(body["recipient_email"], "gp@example.org");
        assert_eq!(body["expires_in_hours"], 24);
    }

    #[tokio::test]
    async fn create_without_ids_fails_locally() {
        let fake = Arc::new(FakeTransport::new());
        let err = SharingService::new(fake.clone(), ORIGIN)
            .create_share_link(&ShareRequest::new(RecordType::Bundle, " , "))
            .await
            .expect_err("no ids");
        assert_eq!(err.message, "Failed to create share link");
        assert_eq!(err.kind, ErrorKind::Invalid);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn revoke_posts_to_revoke_path() {
        let fake = Arc::new(FakeTransport::new().ok(json!({ "message": "Share link revoked successfully" })));
        SharingService::new(fake.clone(), ORIGIN)
            .revoke_share_link("s1")
            .await
            .expect("revoke");
        let call = fake.only_call();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/sharing/s1/revoke");
        assert_eq!(call.options.body, None);
    }

    #[tokio::test]
    async fn revoke_failure_default_message() {
        let fake = Arc::new(FakeTransport::new().server_error(500, None));
        let err = SharingService::new(fake, ORIGIN)
            .revoke_share_link("s1")
            .await
            .expect_err("failure");
        assert_eq!(err.message, "Failed to revoke share link");
    }

    #[tokio::test]
    async fn my_shares_reflect_state() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "data": [
                { "id": "s1", "is_active": false },
                { "id": "s2", "max_access_count": 1, "current_access_count": 1 },
                { "id": "s3", "expires_at": "2000-01-01T00:00:00Z" }
            ]
        })));
        let shares = SharingService::new(fake, ORIGIN)
            .fetch_my_shares()
            .await
            .expect("shares");
        let states: Vec<_> = shares.iter().map(SharedRecord::state).collect();
        assert_eq!(
            states,
            vec![
                ShareState::Revoked,
                ShareState::AccessExhausted,
                ShareState::Expired
            ]
        );
    }

    #[tokio::test]
    async fn open_shared_decodes_records() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "shared_record": { "record_type": "lab_report" },
            "records": [{ "test_type": "Thyroid panel" }],
            "allow_download": false
        })));
        let access = SharingService::new(fake.clone(), ORIGIN)
            .open_shared("tok-9")
            .await
            .expect("access");
        assert!(matches!(access.records, SharedRecords::LabReports(ref r) if r.len() == 1));
        assert_eq!(fake.only_call().path, "/share/tok-9");
    }

    #[tokio::test]
    async fn open_shared_expired_uses_server_message() {
        let fake = Arc::new(FakeTransport::new().server_error(404, Some("Share link not found or expired")));
        let err = SharingService::new(fake, ORIGIN)
            .open_shared("gone")
            .await
            .expect_err("expired");
        assert_eq!(err.message, "Share link not found or expired");
    }
}
