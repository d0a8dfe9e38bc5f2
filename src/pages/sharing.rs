use super::{App, Line, mutate_then_list, or_dash, report, show_list, status};
use clap::{Args, Subcommand};
use phr_client::{HttpTransport, SharingService};
use phr_models::{
    dates, RecordType, ShareMethod, ShareRequest, SharedAccess, SharedRecord, SharedRecords,
};
use std::process::ExitCode;

#[derive(Subcommand)]
pub enum Command {
    /// List the share links you created
    List,
    /// Create a share link
    Create(CreateArgs),
    /// Revoke a share link; it stays in your list as revoked
    Revoke { id: String },
    /// Open a share token as its recipient would
    Open { token: String },
}

#[derive(Args)]
pub struct CreateArgs {
    /// `prescription`, `appointment`, `lab_report` or `bundle`
    #[arg(long, default_value_t = RecordType::Prescription, value_parser = parse_record_type)]
    record_type: RecordType,
    /// Comma-separated record identifiers
    #[arg(long)]
    ids: String,
    #[arg(long, default_value_t = ShareRequest::DEFAULT_EXPIRES_IN_HOURS)]
    expires_in_hours: u32,
    /// 0 for unlimited
    #[arg(long, default_value_t = 0)]
    max_access_count: u32,
    #[arg(long)]
    allow_download: bool,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// `link`, `email` or `sms`
    #[arg(long, default_value_t = ShareMethod::Link, value_parser = parse_share_method)]
    method: ShareMethod,
}

fn parse_record_type(input: &str) -> Result<RecordType, String> {
    input.parse().map_err(|e: phr_models::ModelError| e.to_string())
}

fn parse_share_method(input: &str) -> Result<ShareMethod, String> {
    input.parse().map_err(|e: phr_models::ModelError| e.to_string())
}

impl From<CreateArgs> for ShareRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            expires_in_hours: args.expires_in_hours,
            max_access_count: args.max_access_count,
            allow_download: args.allow_download,
            recipient_email: args.email,
            recipient_phone: args.phone,
            share_method: args.method,
            ..ShareRequest::new(args.record_type, args.ids.as_str())
        }
    }
}

impl Line for SharedRecord {
    fn line(&self) -> String {
        let accesses = match self.remaining_accesses() {
            Some(_) => format!("{}/{}", self.current_access_count, self.max_access_count),
            None => format!("{}/unlimited", self.current_access_count),
        };
        let expires = self
            .expires_at
            .as_ref()
            .map(dates::format_date_time)
            .unwrap_or_else(|| "never".into());
        format!(
            "[{}] {} {}  {}  accesses {}  expires {}  {}",
            self.id.as_deref().unwrap_or("-"),
            or_dash(&self.record_type),
            self.record_ids.join(","),
            self.state(),
            accesses,
            expires,
            or_dash(&self.share_path())
        )
    }
}

fn print_section<T: Line>(heading: &str, items: &[T]) {
    println!("{heading} ({})", items.len());
    for item in items {
        println!("  {}", item.line());
    }
}

fn print_access(access: &SharedAccess) {
    println!("{}", access.shared_record.line());
    if access.allow_download {
        println!("Downloads allowed");
    }
    match &access.records {
        SharedRecords::Prescriptions(items) => print_section("Prescriptions", items),
        SharedRecords::Appointments(items) => print_section("Appointments", items),
        SharedRecords::LabReports(items) => print_section("Lab reports", items),
        SharedRecords::Bundle {
            prescriptions,
            appointments,
            lab_reports,
        } => {
            print_section("Prescriptions", prescriptions);
            print_section("Appointments", appointments);
            print_section("Lab reports", lab_reports);
        }
    }
}

async fn list(app: &App, service: &SharingService<HttpTransport>) -> ExitCode {
    show_list(app, "Share links", service.fetch_my_shares().await)
}

pub async fn run(app: &App, command: Command) -> ExitCode {
    let service = SharingService::new(app.transport(), app.config().app_origin());
    match command {
        Command::List => list(app, &service).await,
        Command::Create(args) => {
            let result = service.create_share_link(&args.into()).await;
            mutate_then_list(
                app,
                result,
                |created| format!("Share link created: {}", created.share_url),
                list(app, &service),
            )
            .await
        }
        Command::Revoke { id } => {
            let result = service.revoke_share_link(&id).await;
            mutate_then_list(
                app,
                result,
                |_| format!("Revoked share link {id}"),
                list(app, &service),
            )
            .await
        }
        Command::Open { token } => {
            let result = service.open_shared(&token).await;
            if app.json {
                return status(report(app, result, |_| String::new()));
            }
            match result {
                Ok(access) => {
                    print_access(&access);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
