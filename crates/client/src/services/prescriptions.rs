use super::{Messages, Page, Records, Resource, DEFAULT_PAGE_LIMIT};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::Prescription;

pub type PrescriptionService<T> = Records<Prescription, T>;

const FETCH_ONE: &str = "Failed to fetch prescription";

impl Resource for Prescription {
    const PATH: &'static str = "/prescriptions";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch prescriptions",
        create: "Failed to create prescription",
        update: "Failed to update prescription",
        delete: "Failed to delete prescription",
    };
}

impl<T: Transport> Records<Prescription, T> {
    /// `GET /prescriptions?limit=&offset=`.
    pub async fn fetch_all(&self, limit: u32, offset: u32) -> ServiceResult<Page<Prescription>> {
        self.list(
            RequestOptions::new()
                .param("limit", limit)
                .param("offset", offset),
        )
        .await
    }

    /// First page with the default page size.
    pub async fn fetch_first_page(&self) -> ServiceResult<Page<Prescription>> {
        self.fetch_all(DEFAULT_PAGE_LIMIT, 0).await
    }

    pub async fn fetch_by_id(&self, id: &str) -> ServiceResult<Prescription> {
        self.fetch_one(id, FETCH_ONE).await
    }
}
