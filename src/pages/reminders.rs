use super::{App, Line, mutate_then_list, or_dash, parse_date_time, show_list};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use phr_client::services::DEFAULT_UPCOMING_DAYS;
use phr_client::{HttpTransport, ReminderService};
use phr_models::{Reminder, ReminderFields};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List reminders
    List {
        /// Only reminders that are still ahead
        #[arg(long)]
        upcoming: bool,
    },
    /// Reminders due in the next few days
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
        days: u32,
    },
    /// Add a reminder
    Add(Fields),
    /// Change the given fields of a reminder
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a reminder
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// RFC 3339 or YYYY-MM-DDTHH:MM (read as UTC)
    #[arg(long, value_parser = parse_date_time)]
    reminder_date: Option<DateTime<FixedOffset>>,
    /// `checkup`, `vaccination`, `test` and so on; `checkup` when adding without it
    #[arg(long)]
    reminder_type: Option<String>,
    #[arg(long)]
    is_completed: Option<bool>,
    #[arg(long)]
    is_recurring: Option<bool>,
    /// `monthly`, `quarterly` or `yearly`
    #[arg(long)]
    recurrence_interval: Option<String>,
}

impl From<Fields> for ReminderFields {
    fn from(f: Fields) -> Self {
        Self {
            title: f.title,
            description: f.description,
            reminder_date: f.reminder_date,
            reminder_type: f.reminder_type,
            is_completed: f.is_completed,
            is_recurring: f.is_recurring,
            recurrence_interval: f.recurrence_interval,
        }
    }
}

impl Line for Reminder {
    fn line(&self) -> String {
        let recurring = if self.is_recurring {
            format!("  every {}", or_dash(&self.recurrence_interval))
        } else {
            String::new()
        };
        format!(
            "[{}] {} ({})  {}{}{}",
            self.id.as_deref().unwrap_or("-"),
            or_dash(&self.title),
            self.reminder_type,
            or_dash(&self.formatted_date()),
            recurring,
            if self.is_completed { "  (done)" } else { "" }
        )
    }
}

async fn list(app: &App, service: &ReminderService<HttpTransport>) -> ExitCode {
    show_list(app, "Reminders", service.fetch_all(false).await)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = ReminderService::new(app.transport());
    match command {
        Command::List { upcoming } => {
            show_list(app, "Reminders", service.fetch_all(upcoming).await)
        }
        Command::Upcoming { days } => show_list(
            app,
            &format!("Reminders in the next {days} days"),
            service.fetch_upcoming(days).await,
        ),
        Command::Add(fields) => {
            let result = service.create(&fields.into()).await;
            mutate_then_list(
                app,
                result,
                |r| format!("Added {}", r.line()),
                list(app, &service),
            )
            .await
        }
        Command::Update { id, fields } => {
            let result = service.update(&id, &fields.into()).await;
            mutate_then_list(
                app,
                result,
                |ack| format!("Updated reminder {id}. {}", ack.message),
                list(app, &service),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted reminder {id}"),
                list(app, &service),
            )
            .await
        }
    }
}
