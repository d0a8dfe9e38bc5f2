use super::{Messages, Records, Resource};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::HealthInsurance;

pub type InsuranceService<T> = Records<HealthInsurance, T>;

impl Resource for HealthInsurance {
    const PATH: &'static str = "/insurance";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch insurance records",
        create: "Failed to create insurance record",
        update: "Failed to update insurance record",
        delete: "Failed to delete insurance record",
    };
}

impl<T: Transport> Records<HealthInsurance, T> {
    pub async fn fetch_all(&self) -> ServiceResult<Vec<HealthInsurance>> {
        Ok(self.list(RequestOptions::new()).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use phr_models::HealthInsuranceFields;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn fetch_all_sends_no_params() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "data": [{ "insurance_provider": "Acme Health", "expiration_date": "2025-03-31" }]
        })));
        let policies = InsuranceService::new(fake.clone())
            .fetch_all()
            .await
            .expect("policies");
        assert_eq!(policies[0].insurance_provider, "Acme Health");
        assert!(fake.only_call().options.params.is_empty());
    }

    #[tokio::test]
    async fn create_failure_default_message() {
        let fake = Arc::new(FakeTransport::new().server_error(500, None));
        let fields = HealthInsuranceFields {
            insurance_provider: Some("Acme Health".into()),
            ..Default::default()
        };
        let err = InsuranceService::new(fake)
            .create(&fields)
            .await
            .expect_err("failure");
        assert_eq!(err.message, "Failed to create insurance record");
    }

    #[tokio::test]
    async fn delete_path() {
        let fake = Arc::new(FakeTransport::new().ok(json!({ "message": "deleted" })));
        InsuranceService::new(fake.clone())
            .delete("ins-1")
            .await
            .expect("delete");
        assert_eq!(fake.only_call().path, "/insurance/ins-1");
    }
}
