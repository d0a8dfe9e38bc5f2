use super::{Messages, Records, Resource};
use crate::error::ServiceResult;
use crate::transport::{RequestOptions, Transport};
use phr_models::Reminder;

pub type ReminderService<T> = Records<Reminder, T>;

pub const DEFAULT_UPCOMING_DAYS: u32 = 30;

const FETCH_UPCOMING: &str = "Failed to fetch upcoming reminders";

impl Resource for Reminder {
    const PATH: &'static str = "/reminders";
    const MESSAGES: Messages = Messages {
        fetch_all: "Failed to fetch reminders",
        create: "Failed to create reminder",
        update: "Failed to update reminder",
        delete: "Failed to delete reminder",
    };
}

impl<T: Transport> Records<Reminder, T> {
    pub async fn fetch_all(&self, upcoming_only: bool) -> ServiceResult<Vec<Reminder>> {
        let page = self
            .list(RequestOptions::new().param("upcoming", upcoming_only))
            .await?;
        Ok(page.items)
    }

    /// Reminders due within the next `days` days.
    pub async fn fetch_upcoming(&self, days: u32) -> ServiceResult<Vec<Reminder>> {
        let page = self
            .list_at(
                "/reminders/upcoming",
                RequestOptions::new().param("days", days),
                FETCH_UPCOMING,
            )
            .await?;
        Ok(page.items)
    }
}
