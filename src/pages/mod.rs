//! CLI pages: one module per page of the records app.
//!
//! Each page turns flags into form values, calls one service operation and renders the result.
//! After a successful mutation the page fetches its list again, one request after the other.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod insurance;
pub mod lab_reports;
pub mod medications;
pub mod prescriptions;
pub mod reminders;
pub mod sharing;

use chrono::{DateTime, FixedOffset, NaiveDate};
use phr_client::{
    ClientConfig, HttpTransport, Navigator, Outcome, Page, ServiceResult, Session, LOGIN_ROUTE,
};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;

/// Renders the login redirect for a terminal user.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &str) {
        if route == LOGIN_ROUTE {
            eprintln!("Your session has ended. Run `phr login` to sign in.");
        } else {
            eprintln!("Continue at {route}");
        }
    }
}

/// Everything a page needs: output mode, configuration and the shared transport.
pub struct App {
    json: bool,
    config: ClientConfig,
    session: Arc<Session>,
    transport: Arc<HttpTransport>,
}

impl App {
    pub fn new(
        json: bool,
        config: ClientConfig,
        session: Arc<Session>,
        transport: Arc<HttpTransport>,
    ) -> Self {
        Self {
            json,
            config,
            session,
            transport,
        }
    }

    pub fn transport(&self) -> Arc<HttpTransport> {
        Arc::clone(&self.transport)
    }

    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// One-line text rendering of a record.
pub trait Line {
    fn line(&self) -> String;
}

pub fn status(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub(crate) fn print_json<T: Serialize>(outcome: &Outcome<T>) {
    match serde_json::to_string(outcome) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("error: failed to render JSON: {e}"),
    }
}

fn print_lines<T: Line>(heading: &str, items: &[T], total: Option<u64>) {
    match total {
        Some(total) => println!("{heading} ({} of {total})", items.len()),
        None => println!("{heading} ({})", items.len()),
    }
    if items.is_empty() {
        println!("  none");
    }
    for item in items {
        println!("  {}", item.line());
    }
}

/// Render a list result.
pub fn show_list<T: Serialize + Line>(
    app: &App,
    heading: &str,
    result: ServiceResult<Vec<T>>,
) -> ExitCode {
    show_page(
        app,
        heading,
        result.map(|items| Page { items, total: None }),
    )
}

/// Render a paginated list result.
pub fn show_page<T: Serialize + Line>(
    app: &App,
    heading: &str,
    result: ServiceResult<Page<T>>,
) -> ExitCode {
    if app.json {
        let outcome = Outcome::from_page(result);
        print_json(&outcome);
        return status(outcome.success);
    }
    match result {
        Ok(page) => {
            print_lines(heading, &page.items, page.total);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Render the result of a single operation; `describe` produces the text-mode summary.
///
/// Returns whether the operation succeeded.
pub fn report<T: Serialize>(
    app: &App,
    result: ServiceResult<T>,
    describe: impl FnOnce(&T) -> String,
) -> bool {
    if app.json {
        let outcome = Outcome::from_result(result);
        print_json(&outcome);
        return outcome.success;
    }
    match result {
        Ok(data) => {
            println!("{}", describe(&data));
            true
        }
        Err(err) => {
            eprintln!("error: {err}");
            false
        }
    }
}

/// Render a mutation and, if it succeeded, the refreshed list.
pub async fn mutate_then_list<T, F>(
    app: &App,
    result: ServiceResult<T>,
    describe: impl FnOnce(&T) -> String,
    relist: F,
) -> ExitCode
where
    T: Serialize,
    F: std::future::Future<Output = ExitCode>,
{
    if !report(app, result, describe) {
        return ExitCode::FAILURE;
    }
    relist.await
}

pub fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() { "-" } else { text }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    phr_models::dates::parse_date(input).map_err(|e| e.to_string())
}

pub fn parse_date_time(input: &str) -> Result<DateTime<FixedOffset>, String> {
    phr_models::dates::parse_date_time(input).map_err(|e| e.to_string())
}
