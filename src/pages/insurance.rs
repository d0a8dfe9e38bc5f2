use super::{App, Line, mutate_then_list, or_dash, parse_date, show_list};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use phr_client::{HttpTransport, InsuranceService};
use phr_models::{HealthInsurance, HealthInsuranceFields, dates};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List insurance policies
    List,
    /// Add a policy
    Add(Fields),
    /// Change the given fields of a policy
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a policy
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    insurance_provider: Option<String>,
    #[arg(long)]
    policy_number: Option<String>,
    #[arg(long)]
    group_number: Option<String>,
    #[arg(long)]
    member_id: Option<String>,
    #[arg(long, value_parser = parse_date)]
    effective_date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    expiration_date: Option<NaiveDate>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<Fields> for HealthInsuranceFields {
    fn from(f: Fields) -> Self {
        Self {
            insurance_provider: f.insurance_provider,
            policy_number: f.policy_number,
            group_number: f.group_number,
            member_id: f.member_id,
            effective_date: f.effective_date,
            expiration_date: f.expiration_date,
            notes: f.notes,
        }
    }
}

fn date_or_dash(date: Option<&NaiveDate>) -> String {
    date.map(dates::format_date).unwrap_or_else(|| "-".into())
}

impl Line for HealthInsurance {
    fn line(&self) -> String {
        format!(
            "[{}] {}  policy {}  member {}  {} to {}{}",
            self.id.as_deref().unwrap_or("-"),
            or_dash(&self.insurance_provider),
            or_dash(&self.policy_number),
            or_dash(&self.member_id),
            date_or_dash(self.effective_date.as_ref()),
            date_or_dash(self.expiration_date.as_ref()),
            if self.is_lapsed_on(dates::today()) { "  (lapsed)" } else { "" }
        )
    }
}

async fn list(app: &App, service: &InsuranceService<HttpTransport>) -> ExitCode {
    show_list(app, "Insurance", service.fetch_all().await)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = InsuranceService::new(app.transport());
    match command {
        Command::List => list(app, &service).await,
        Command::Add(fields) => {
            let result = service.create(&fields.into()).await;
            mutate_then_list(
                app,
                result,
                |i| format!("Added {}", i.line()),
                list(app, &service),
            )
            .await
        }
        Command::Update { id, fields } => {
            let result = service.update(&id, &fields.into()).await;
            mutate_then_list(
                app,
                result,
                |ack| format!("Updated insurance record {id}. {}", ack.message),
                list(app, &service),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted insurance record {id}"),
                list(app, &service),
            )
            .await
        }
    }
}
