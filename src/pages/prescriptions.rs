use super::{App, Line, mutate_then_list, or_dash, parse_date, report, show_page, status};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use phr_client::{HttpTransport, PrescriptionService};
use phr_client::services::DEFAULT_PAGE_LIMIT;
use phr_models::{Prescription, PrescriptionFields};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List prescriptions
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one prescription
    Show { id: String },
    /// Add a prescription
    Add(Fields),
    /// Change the given fields of a prescription
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a prescription
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    medicine_name: Option<String>,
    #[arg(long)]
    dosage: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    prescribing_doctor: Option<String>,
    #[arg(long)]
    doctor_specialty: Option<String>,
    #[arg(long)]
    hospital: Option<String>,
    /// YYYY-MM-DD; defaults to today when adding
    #[arg(long, value_parser = parse_date)]
    prescription_date: Option<NaiveDate>,
    #[arg(long)]
    attachment_url: Option<String>,
    #[arg(long)]
    attachment_type: Option<String>,
    #[arg(long)]
    is_active: Option<bool>,
}

impl From<Fields> for PrescriptionFields {
    fn from(f: Fields) -> Self {
        Self {
            medicine_name: f.medicine_name,
            dosage: f.dosage,
            instructions: f.instructions,
            prescribing_doctor: f.prescribing_doctor,
            doctor_specialty: f.doctor_specialty,
            hospital: f.hospital,
            prescription_date: f.prescription_date,
            attachment_url: f.attachment_url,
            attachment_type: f.attachment_type,
            is_active: f.is_active,
        }
    }
}

impl Line for Prescription {
    fn line(&self) -> String {
        format!(
            "[{}] {} {}  by {}  on {}{}{}",
            self.id.as_deref().unwrap_or("-"),
            self.medicine_name,
            or_dash(&self.dosage),
            or_dash(&self.prescribing_doctor),
            self.formatted_date(),
            if self.is_active { "" } else { "  (inactive)" },
            if self.has_attachment() { "  +attachment" } else { "" }
        )
    }
}

async fn list(
    app: &App,
    service: &PrescriptionService<HttpTransport>,
    limit: u32,
    offset: u32,
) -> ExitCode {
    show_page(app, "Prescriptions", service.fetch_all(limit, offset).await)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = PrescriptionService::new(app.transport());
    match command {
        Command::List { limit, offset } => list(app, &service, limit, offset).await,
        Command::Show { id } => {
            let result = service.fetch_by_id(&id).await;
            status(report(app, result, |p| {
                format!("{}\n  instructions: {}", p.line(), or_dash(&p.instructions))
            }))
        }
        Command::Add(fields) => {
            let result = service.create(&fields.into()).await;
            mutate_then_list(
                app,
                result,
                |p| format!("Added {}", p.line()),
                list(app, &service, DEFAULT_PAGE_LIMIT, 0),
            )
            .await
        }
        Command::Update { id, fields } => {
            let result = service.update(&id, &fields.into()).await;
            mutate_then_list(
                app,
                result,
                |ack| format!("Updated prescription {id}. {}", ack.message),
                list(app, &service, DEFAULT_PAGE_LIMIT, 0),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted prescription {id}"),
                list(app, &service, DEFAULT_PAGE_LIMIT, 0),
            )
            .await
        }
    }
}
