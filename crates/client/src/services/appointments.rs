use super::{Messages, Page, Records, Resource};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::Appointment;

pub type AppointmentService<T> = Records<Appointment, T>;

impl Resource for Appointment {
    const PATH: &'static str = "/appointments";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch appointments",
        create: "Failed to create appointment",
        update: "Failed to update appointment",
        delete: "Failed to delete appointment",
    };
}

impl<T: Transport> Records<Appointment, T> {
    /// `GET /appointments?limit=&offset=&upcoming=`. Filtering happens on the server.
    pub async fn fetch_all(
        &self,
        limit: u32,
        offset: u32,
        upcoming_only: bool,
    ) -> ServiceResult<Page<Appointment>> {
        self.list(
            RequestOptions::new()
                .param("limit", limit)
                .param("offset", offset)
                .param("upcoming", upcoming_only),
        )
        .await
    }
}
