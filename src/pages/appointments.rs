use super::{App, Line, mutate_then_list, or_dash, parse_date_time, show_page};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Subcommand};
use phr_client::services::DEFAULT_PAGE_LIMIT;
use phr_client::{AppointmentService, HttpTransport};
use phr_models::{Appointment, AppointmentFields};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List appointments
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Only appointments that have not happened yet
        #[arg(long)]
        upcoming: bool,
    },
    /// Book an appointment
    Add(Fields),
    /// Change the given fields of an appointment
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete an appointment
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    doctor_name: Option<String>,
    #[arg(long)]
    specialty: Option<String>,
    #[arg(long)]
    hospital: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// RFC 3339 or YYYY-MM-DDTHH:MM (read as UTC)
    #[arg(long, value_parser = parse_date_time)]
    appointment_date: Option<DateTime<FixedOffset>>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long)]
    is_completed: Option<bool>,
}

impl From<Fields> for AppointmentFields {
    fn from(f: Fields) -> Self {
        Self {
            doctor_name: f.doctor_name,
            specialty: f.specialty,
            hospital: f.hospital,
            location: f.location,
            appointment_date: f.appointment_date,
            notes: f.notes,
            is_completed: f.is_completed,
        }
    }
}

impl Line for Appointment {
    fn line(&self) -> String {
        format!(
            "[{}] {} ({})  {}  at {}, {}{}",
            self.id.as_deref().unwrap_or("-"),
            or_dash(&self.doctor_name),
            or_dash(&self.specialty),
            or_dash(&self.formatted_date()),
            or_dash(&self.hospital),
            or_dash(&self.location),
            if self.is_completed { "  (completed)" } else { "" }
        )
    }
}

async fn list(app: &App, service: &AppointmentService<HttpTransport>) -> ExitCode {
    let result = service.fetch_all(DEFAULT_PAGE_LIMIT, 0, false).await;
    show_page(app, "Appointments", result)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = AppointmentService::new(app.transport());
    match command {
        Command::List {
            limit,
            offset,
            upcoming,
        } => {
            let result = service.fetch_all(limit, offset, upcoming).await;
            show_page(app, "Appointments", result)
        }
        Command::Add(fields) => {
            let result = service.create(&fields.into()).await;
            mutate_then_list(
                app,
                result,
                |a| format!("Booked {}", a.line()),
                list(app, &service),
            )
            .await
        }
        Command::Update { id, fields } => {
            let result = service.update(&id, &fields.into()).await;
            mutate_then_list(
                app,
                result,
                |ack| format!("Updated appointment {id}. {}", ack.message),
                list(app, &service),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted appointment {id}"),
                list(app, &service),
            )
            .await
        }
    }
}
