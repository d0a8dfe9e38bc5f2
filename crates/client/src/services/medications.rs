use super::{Messages, Records, Resource};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::Medication;

pub type MedicationService<T> = Records<Medication, T>;

const FETCH_REFILL_NEEDED: &str = "Failed to fetch medications needing refill";

impl Resource for Medication {
    const PATH: &'static str = "/medications";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch medications",
        create: "Failed to create medication",
        update: "Failed to update medication",
        delete: "Failed to delete medication",
    };
}

impl<T: Transport> Records<Medication, T> {
    /// `GET /medications?active=`.
    pub async fn fetch_all(&self, active_only: bool) -> ServiceResult<Vec<Medication>> {
        let page = self
            .list(RequestOptions::new().param("active", active_only))
            .await?;
        Ok(page.items)
    }

    /// Medications whose refill reminder window has opened, as decided by the server.
    pub async fn fetch_needing_refill(&self) -> ServiceResult<Vec<Medication>> {
        let page = self
            .list_at(
                "/medications/refill-needed",
                RequestOptions::new(),
                FETCH_REFILL_NEEDED,
            )
            .await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorKind};
    use crate::testing::FakeTransport;
    use crate::transport::Method;
    use phr_models::MedicationFields;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn create_defaults_refill_days_and_reports_default_failure() {
        let fake = Arc::new(FakeTransport::new().server_error(500, None));
        let fields = MedicationFields {
            medicine_name: Some("Metformin".into()),
            dosage: Some("500mg".into()),
            frequency: Some("twice daily".into()),
            ..Default::default()
        };
        let err = MedicationService::new(fake.clone())
            .create(&fields)
            .await
            .expect_err("server failure");
        assert_eq!(err.message, "Failed to create medication");

        let call = fake.only_call();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.path, "/medications");
        assert_eq!(
            call.options.body,
            Some(json!({
                "medicine_name": "Metformin",
                "dosage": "500mg",
                "frequency": "twice daily",
                "pharmacy_name": "",
                "pharmacy_phone": "",
                "pharmacy_address": "",
                "last_refill_date": null,
                "next_refill_date": null,
                "refill_reminder_days": 7,
                "is_active": true
            }))
        );
    }

    #[tokio::test]
    async fn create_failure_prefers_server_error() {
        let fake = Arc::new(
            FakeTransport::new().server_error(400, Some("Key: 'Medication.MedicineName' Error")),
        );
        let err = MedicationService::new(fake)
            .create(&MedicationFields::default())
            .await
            .expect_err("validation failure");
        assert_eq!(err.message, "Key: 'Medication.MedicineName' Error");
        assert_eq!(err.kind, ErrorKind::Server { status: 400 });
    }

    #[tokio::test]
    async fn fetch_all_sends_active_flag() {
        let fake = Arc::new(FakeTransport::new().ok(json!({ "data": [{ "medicine_name": "Aspirin" }] })));
        let meds = MedicationService::new(fake.clone())
            .fetch_all(true)
            .await
            .expect("medications");
        assert_eq!(meds.len(), 1);
        assert_eq!(
            fake.only_call().options.params,
            vec![("active".to_owned(), "true".to_owned())]
        );
    }

    #[tokio::test]
    async fn refill_needed_network_failure_uses_default() {
        let fake = Arc::new(FakeTransport::new().respond(Err(ApiError::Network("timed out".into()))));
        let err = MedicationService::new(fake.clone())
            .fetch_needing_refill()
            .await
            .expect_err("network");
        assert_eq!(err.message, "Failed to fetch medications needing refill");
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(fake.only_call().path, "/medications/refill-needed");
    }
}
