use super::{App, Line, print_json, status};
use phr_client::{DashboardService, Outcome};
use std::process::ExitCode;

fn section<T: Line>(heading: &str, items: &[T]) {
    println!("{heading}");
    if items.is_empty() {
        println!("  none");
    }
    for item in items {
        println!("  {}", item.line());
    }
}

pub async fn run(app: &App) -> ExitCode {
    let result = DashboardService::new(app.transport()).fetch_dashboard().await;
    if app.json {
        let outcome = Outcome::from_result(result);
        print_json(&outcome);
        return status(outcome.success);
    }
    match result {
        Ok(data) => {
            section("Recent prescriptions", &data.prescriptions);
            section("Upcoming appointments", &data.appointments);
            section("Recent lab reports", &data.lab_reports);
            section("Active medications", &data.medications);
            section("Upcoming reminders", &data.reminders);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
