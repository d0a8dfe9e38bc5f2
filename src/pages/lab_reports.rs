use super::{App, Line, mutate_then_list, or_dash, parse_date, show_page};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use phr_client::services::DEFAULT_PAGE_LIMIT;
use phr_client::{HttpTransport, LabReportService};
use phr_models::{LabReport, LabReportFields};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List lab reports
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Add a lab report
    Add(Fields),
    /// Change the given fields of a lab report
    Update {
        id: String,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a lab report
    Delete { id: String },
}

#[derive(Args)]
pub struct Fields {
    #[arg(long)]
    test_type: Option<String>,
    #[arg(long)]
    lab_name: Option<String>,
    /// YYYY-MM-DD; defaults to today when adding
    #[arg(long, value_parser = parse_date)]
    test_date: Option<NaiveDate>,
    #[arg(long)]
    report_url: Option<String>,
    /// For example `pdf` or `image`
    #[arg(long)]
    report_type: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<Fields> for LabReportFields {
    fn from(f: Fields) -> Self {
        Self {
            test_type: f.test_type,
            lab_name: f.lab_name,
            test_date: f.test_date,
            report_url: f.report_url,
            report_type: f.report_type,
            notes: f.notes,
        }
    }
}

impl Line for LabReport {
    fn line(&self) -> String {
        format!(
            "[{}] {}  {}  on {}  {}",
            self.id.as_deref().unwrap_or("-"),
            or_dash(&self.test_type),
            or_dash(&self.lab_name),
            self.formatted_date(),
            or_dash(&self.report_url)
        )
    }
}

async fn list(app: &App, service: &LabReportService<HttpTransport>) -> ExitCode {
    show_page(
        app,
        "Lab reports",
        service.fetch_all(DEFAULT_PAGE_LIMIT, 0).await,
    )
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = LabReportService::new(app.transport());
    match command {
        Command::List { limit, offset } => {
            show_page(app, "Lab reports", service.fetch_all(limit, offset).await)
        }
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
                |ack| format!("Updated lab report {id}. {}", ack.message),
                list(app, &service),
            )
            .await
        }
        Command::Delete { id } => {
            let result = service.delete(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Deleted lab report {id}"),
                list(app, &service),
            )
            .await
        }
    }
}
