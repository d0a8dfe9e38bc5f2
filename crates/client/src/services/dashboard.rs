use super::call;
use crate::error::ServiceResult;
use crate::transport::{Method, RequestOptions, Transport};
use phr_models::DashboardData;
use std::sync::Arc;

const FETCH: &str = "Failed to fetch dashboard data";

/// One call that fans out into the five summary collections.
pub struct DashboardService<T> {
    transport: Arc<T>,
}

impl<T: Transport> DashboardService<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn fetch_dashboard(&self) -> ServiceResult<DashboardData> {
        call(
            self.transport.as_ref(),
            Method::Get,
            "/dashboard",
            RequestOptions::new(),
            "dashboard",
            FETCH,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use serde_json::json;

    #[tokio::test]
    async fn decodes_all_collections() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "prescriptions": [{ "medicine_name": "Ramipril" }],
            "appointments": null,
            "lab_reports": [],
            "medications": [{ "medicine_name": "Ramipril", "refill_reminder_days": 0 }],
            "reminders": [{ "title": "BP check" }]
        })));
        let data = DashboardService::new(fake.clone())
            .fetch_dashboard()
            .await
            .expect("dashboard");
        assert_eq!(data.prescriptions.len(), 1);
        assert!(data.appointments.is_empty());
        assert_eq!(data.medications[0].refill_reminder_days, 0);
        assert_eq!(data.reminders[0].title, "BP check");
        assert_eq!(fake.only_call().path, "/dashboard");
    }

    #[tokio::test]
    async fn failure_default_message() {
        let fake = Arc::new(FakeTransport::new().server_error(503, None));
        let err = DashboardService::new(fake)
            .fetch_dashboard()
            .await
            .expect_err("failure");
        assert_eq!(err.message, "Failed to fetch dashboard data");
    }
}
