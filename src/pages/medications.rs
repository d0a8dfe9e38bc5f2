use super::{App, Line, mutate_then_list, or_dash, parse_date, show_list};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use phr_client::{HttpTransport, MedicationService};
use phr_models::{Medication, MedicationFields, dates};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List medications
    List {
        /// Only medications still being taken
        #[arg(long)]
        active: bool,
    },
    /// Medications due for a refill
    RefillNeeded,
    /// Add a medication
    Add(Fields),
    /// Change the given fields of a medication
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a medication
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    medicine_name: Option<String>,
    #[arg(long)]
    dosage: Option<String>,
    /// For example `daily` or `twice daily`
    #[arg(long)]
    frequency: Option<String>,
    #[arg(long)]
    pharmacy_name: Option<String>,
    #[arg(long)]
    pharmacy_phone: Option<String>,
    #[arg(long)]
    pharmacy_address: Option<String>,
    #[arg(long, value_parser = parse_date)]
    last_refill_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    next_refill_date: Option<NaiveDate>,
    /// Days before the next refill to start reminding; 7 when adding without it
    #[arg(long)]
    refill_reminder_days: Option<u32>,
    #[arg(long)]
    is_active: Option<bool>,
}

impl From<Fields> for MedicationFields {
    fn from(f: Fields) -> Self {
        Self {
            medicine_name: f.medicine_name,
            dosage: f.dosage,
            frequency: f.frequency,
            pharmacy_name: f.pharmacy_name,
            pharmacy_phone: f.pharmacy_phone,
            pharmacy_address: f.pharmacy_address,
            last_refill_date: f.last_refill_date,
            next_refill_date: f.next_refill_date,
            refill_reminder_days: f.refill_reminder_days,
            is_active: f.is_active,
        }
    }
}

impl Line for Medication {
    fn line(&self) -> String {
        let next = self
            .next_refill_date
            .as_ref()
            .map(dates::format_date)
            .unwrap_or_else(|| "-".into());
        let due = if self.refill_due_on(dates::today()) {
            "  (refill due)"
        } else {
            ""
        };
        format!(
            "[{}] {} {} {}  pharmacy: {}  next refill: {}{}{}",
            self.id.as_deref().unwrap_or("-"),
            self.medicine_name,
            or_dash(&self.dosage),
            or_dash(&self.frequency),
            or_dash(&self.pharmacy_name),
            next,
            due,
            if self.is_active { "" } else { "  (stopped)" }
        )
    }
}

async fn list(app: &App, service: &MedicationService<HttpTransport>) -> ExitCode {
    show_list(app, "Medications", service.fetch_all(false).await)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = MedicationService::new(app.transport());
    match command {
        Command::List { active } => {
            show_list(app, "Medications", service.fetch_all(active).await)
        }
        Command::RefillNeeded => show_list(
            app,
            "Medications needing refill",
            service.fetch_needing_refill().await,
        ),
        Command::Add(fields) => {
            let result = service.create(&fields.into()).await;
            mutate_then_list(
                app,
                result,
                |m| format!("Added {}", m.line()),
                list(app, &service),
            )
            .await
        }
        Command::Update { id, fields } => {
            let result = service.update(&id, &fields.into()).await;
            mutate_then_list(
                app,
                result,
                |ack| format!("Updated medication {id}. {}", ack.message),
                list(app, &service),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted medication {id}"),
                list(app, &service),
            )
            .await
        }
    }
}
