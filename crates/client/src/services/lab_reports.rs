use super::{Messages, Page, Records, Resource};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::LabReport;

pub type LabReportService<T> = Records<LabReport, T>;

impl Resource for LabReport {
    const PATH: &'static str = "/lab-reports";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch lab reports",
        create: "Failed to create lab report",
        update: "Failed to update lab report",
        delete: "Failed to delete lab report",
    };
}

impl<T: Transport> Records<LabReport, T> {
    pub async fn fetch_all(&self, limit: u32, offset: u32) -> ServiceResult<Page<LabReport>> {
        self.list(
            RequestOptions::new()
                .param("limit", limit)
                .param("offset", offset),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use phr_models::LabReportFields;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn fetch_all_uses_lab_reports_path() {
        let fake = Arc::new(FakeTransport::new().ok(json!({
            "data": [{ "test_type": "Full blood count", "test_date": "2024-02-10" }],
            "total": 1
        })));
        let page = LabReportService::new(fake.clone())
            .fetch_all(10, 0)
            .await
            .expect("page");
        assert_eq!(page.items[0].formatted_date(), "10 Feb 2024");
        assert_eq!(fake.only_call().path, "/lab-reports");
    }

    #[tokio::test]
    async fn update_with_no_changes_sends_empty_object() {
        let fake = Arc::new(FakeTransport::new().ok(serde_json::Value::Null));
        let ack = LabReportService::new(fake.clone())
            .update("l1", &LabReportFields::default())
            .await
            .expect("update");
        assert_eq!(ack.message, "");
        assert_eq!(fake.only_call().options.body, Some(json!({})));
    }

    #[tokio::test]
    async fn update_rejects_path_characters_in_id() {
        let fake = Arc::new(FakeTransport::new());
        let err = LabReportService::new(fake.clone())
            .update("../users", &LabReportFields::default())
            .await
            .expect_err("bad id");
        assert_eq!(err.message, "Failed to update lab report");
        assert!(fake.calls().is_empty());
    }
}
