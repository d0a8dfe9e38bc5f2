use super::{App, Line, or_dash, report, status};
use clap::Args;
use phr_client::AuthService;
use phr_models::{RegisterRequest, User, dates};
use std::io::BufRead;
use std::process::ExitCode;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    email: String,
    /// Read from the first line of stdin when omitted
    #[arg(long)]
    password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    email: String,
    /// Read from the first line of stdin when omitted
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long, default_value = "")]
    phone: String,
}

impl Line for User {
    fn line(&self) -> String {
        let dob = self
            .date_of_birth
            .as_ref()
            .map(dates::format_date)
            .unwrap_or_else(|| "-".into());
        format!(
            "{} <{}>  role: {}  phone: {}  born: {}  email verified: {}",
            or_dash(&self.full_name()),
            self.email,
            self.role,
            or_dash(&self.phone),
            dob,
            if self.is_email_verified { "yes" } else { "no" }
        )
    }
}

fn password(flag: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }
    eprintln!("Password:");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    anyhow::ensure!(!password.is_empty(), "a password is required");
    Ok(password)
}

fn service(app: &App) -> AuthService<phr_client::HttpTransport> {
    AuthService::new(app.transport(), app.session())
}

pub async fn login(app: &App, args: LoginArgs) -> anyhow::Result<ExitCode> {
    let password = password(args.password)?;
    let result = service(app).login(&args.email, &password).await;
    let ok = report(app, result, |user| format!("Signed in as {}", user.line()));
    Ok(status(ok))
}

pub async fn register(app: &App, args: RegisterArgs) -> anyhow::Result<ExitCode> {
    let request = RegisterRequest {
        email: args.email.trim().to_owned(),
        password: password(args.password)?,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
    };
    let result = service(app).register(&request).await;
    let ok = report(app, result, |user| {
        format!("Registered and signed in as {}", user.line())
    });
    Ok(status(ok))
}

pub fn logout(app: &App) -> ExitCode {
    let ok = report(app, service(app).logout(), |_| "Signed out".to_owned());
    status(ok)
}

pub async fn profile(app: &App) -> ExitCode {
    let ok = report(app, service(app).profile().await, User::line);
    status(ok)
}
