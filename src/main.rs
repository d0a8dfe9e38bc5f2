use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phr_client::{ClientConfig, HttpTransport, Session};

mod pages;

use pages::{App, TerminalNavigator};

#[derive(Parser)]
#[command(name = "phr")]
#[command(about = "Personal health records from the command line")]
struct Cli {
    /// Print results as `{success, data|error, total?}` JSON, one document per line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login(pages::auth::LoginArgs),
    /// Create an account and sign in
    Register(pages::auth::RegisterArgs),
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Profile,
    /// Summary of current prescriptions, appointments, reports, medications and reminders
    Dashboard,
    /// Prescriptions from your doctors
    #[command(subcommand)]
    Prescriptions(pages::prescriptions::Command),
    /// Upcoming and past appointments
    #[command(subcommand)]
    Appointments(pages::appointments::Command),
    /// Lab test results
    #[command(subcommand)]
    LabReports(pages::lab_reports::Command),
    /// Regular medications and refills
    #[command(subcommand)]
    Medications(pages::medications::Command),
    /// Health check-up reminders
    #[command(subcommand)]
    Reminders(pages::reminders::Command),
    /// Health insurance policies
    #[command(subcommand)]
    Insurance(pages::insurance::Command),
    /// Share links to your records
    #[command(subcommand)]
    Sharing(pages::sharing::Command),
}

/// Entry point for the `phr` CLI.
///
/// Configuration is resolved once here and passed into the client.
///
/// # Environment Variables
/// - `PHR_API_URL`: API base URL (default: "http://localhost:8080/api/v1")
/// - `PHR_APP_ORIGIN`: origin share links are composed under (default: "http://localhost:3000")
/// - `PHR_SESSION_FILE`: where the session token is saved (default: ".phr-session")
/// - `PHR_HTTP_TIMEOUT_SECS`: request timeout in seconds (default: 30)
/// - `RUST_LOG`: log filter (default directive: "phr=info")
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("phr=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_lookup(|name| std::env::var(name).ok())?;
    let session = Arc::new(Session::load(
        config.session_file().map(std::path::Path::to_path_buf),
        Arc::new(TerminalNavigator),
    ));
    let transport = Arc::new(HttpTransport::new(&config, session.clone())?);
    tracing::debug!(api_url = config.api_url(), "client configured");

    let app = App::new(cli.json, config, session, transport);

    let code = match cli.command {
        Commands::Login(args) => pages::auth::login(&app, args).await?,
        Commands::Register(args) => pages::auth::register(&app, args).await?,
        Commands::Logout => pages::auth::logout(&app),
        Commands::Profile => pages::auth::profile(&app).await,
        Commands::Dashboard => pages::dashboard::run(&app).await,
        Commands::Prescriptions(cmd) => pages::prescriptions::run(&app, cmd).await,
        Commands::Appointments(cmd) => pages::appointments::run(&app, cmd).await,
        Commands::LabReports(cmd) => pages::lab_reports::run(&app, cmd).await,
        Commands::Medications(cmd) => pages::medications::run(&app, cmd).await,
        Commands::Reminders(cmd) => pages::reminders::run(&app, cmd).await,
        Commands::Insurance(cmd) => pages::insurance::run(&app, cmd).await,
        Commands::Sharing(cmd) => pages::sharing::run(&app, cmd).await,
    };

    Ok(code)
}
