//! Runs the real HTTP transport against an in-process fake API.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use phr_client::{
    ClientConfig, ErrorKind, HttpTransport, MedicationService, Navigator, ReminderService,
    Session, AppointmentService, AuthService, PrescriptionService, LOGIN_ROUTE,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    routes: Mutex<Vec<String>>,
}

impl Navigator for Recorder {
    fn redirect(&self, route: &str) {
        self.routes.lock().expect("lock").push(route.to_owned());
    }
}

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    issued_token: Arc<Mutex<Option<String>>>,
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api/v1")
}

fn config(api_url: &str, session_file: Option<PathBuf>) -> ClientConfig {
    ClientConfig::new(
        api_url,
        "http://localhost:3000",
        session_file,
        Duration::from_secs(5),
    )
    .expect("config")
}

fn transport(
    api_url: &str,
    session_file: Option<PathBuf>,
) -> (Arc<HttpTransport>, Arc<Session>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let session = Arc::new(Session::load(session_file.clone(), recorder.clone()));
    let transport = HttpTransport::new(&config(api_url, session_file), session.clone())
        .expect("transport");
    (Arc::new(transport), session, recorder)
}

async fn login(State(seen): State<Seen>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] != "correct horse" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        );
    }
    let token = uuid::Uuid::new_v4().to_string();
    *seen.issued_token.lock().expect("lock") = Some(token.clone());
    (
        StatusCode::OK,
        Json(json!({
            "message": "Login successful",
            "user": { "email": body["email"], "first_name": "Pat", "last_name": "Doe" },
            "token": token
        })),
    )
}

async fn medications(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
    seen.headers.lock().expect("lock").push(headers.clone());
    let expected = seen
        .issued_token
        .lock()
        .expect("lock")
        .clone()
        .map(|t| format!("Bearer {t}"));
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    if expected.is_none() || presented != expected {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "data": [{ "id": "m1", "medicine_name": "Metformin" }] })),
    )
}

#[tokio::test]
async fn login_token_is_sent_as_bearer() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/medications", get(medications))
        .with_state(seen.clone());
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("session.json");
    let (transport, session, _) = transport(&base, Some(file.clone()));

    let user = AuthService::new(transport.clone(), session.clone())
        .login("pat@example.org", "correct horse")
        .await
        .expect("login");
    assert_eq!(user.full_name(), "Pat Doe");
    assert!(file.exists());

    let meds = MedicationService::new(transport)
        .fetch_all(false)
        .await
        .expect("medications");
    assert_eq!(meds[0].medicine_name, "Metformin");
    assert_eq!(meds[0].refill_reminder_days, 7);

    let headers = seen.headers.lock().expect("lock").clone();
    let content_type = headers[0]
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    assert_eq!(content_type, Some("application/json"));
}

#[tokio::test]
async fn saved_session_is_reused_on_startup() {
    let seen = Seen::default();
    *seen.issued_token.lock().expect("lock") = Some("saved-token".into());
    let app = Router::new()
        .route("/api/v1/medications", get(medications))
        .with_state(seen);
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("session.json");
    std::fs::write(&file, r#"{"token":"saved-token"}"#).expect("write");

    let (transport, _, _) = transport(&base, Some(file));
    MedicationService::new(transport)
        .fetch_all(true)
        .await
        .expect("authorised with saved token");
}

#[tokio::test]
async fn unauthorised_list_clears_session_and_redirects() {
    let app = Router::new().route(
        "/api/v1/reminders",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid or expired token" })),
            )
        }),
    );
    let base = serve(app).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("session.json");
    std::fs::write(&file, r#"{"token":"stale"}"#).expect("write");
    let (transport, session, recorder) = transport(&base, Some(file.clone()));
    assert!(session.is_authenticated());

    let err = ReminderService::new(transport)
        .fetch_all(false)
        .await
        .expect_err("401");
    assert_eq!(err.kind, ErrorKind::Unauthorised);
    assert_eq!(err.message, "Invalid or expired token");
    assert!(!session.is_authenticated());
    assert!(!file.exists());
    assert_eq!(
        recorder.routes.lock().expect("lock").clone(),
        vec![LOGIN_ROUTE.to_owned()]
    );
}

#[tokio::test]
async fn non_json_failure_uses_default_message() {
    let app = Router::new().route(
        "/api/v1/prescriptions",
        get(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream down</html>") }),
    );
    let base = serve(app).await;
    let (transport, session, recorder) = transport(&base, None);

    let err = PrescriptionService::new(transport)
        .fetch_all(10, 0)
        .await
        .expect_err("502");
    assert_eq!(err.message, "Failed to fetch prescriptions");
    assert_eq!(err.kind, ErrorKind::Server { status: 502 });
    assert!(recorder.routes.lock().expect("lock").is_empty());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/api/v1/appointments",
            get(
                |State(seen): State<Seen>, Query(query): Query<HashMap<String, String>>| async move {
                    seen.queries.lock().expect("lock").push(query);
                    Json(json!({ "data": [], "total": 0, "limit": 5, "offset": 15 }))
                },
            ),
        )
        .with_state(seen.clone());
    let base = serve(app).await;
    let (transport, _, _) = transport(&base, None);

    let page = AppointmentService::new(transport)
        .fetch_all(5, 15, true)
        .await
        .expect("page");
    assert_eq!(page.total, Some(0));

    let query = seen.queries.lock().expect("lock")[0].clone();
    assert_eq!(query.get("limit").map(String::as_str), Some("5"));
    assert_eq!(query.get("offset").map(String::as_str), Some("15"));
    assert_eq!(query.get("upcoming").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let app = Router::new().route(
        "/api/v1/medications/:id",
        delete(|| async { StatusCode::NO_CONTENT }),
    );
    let base = serve(app).await;
    let (transport, _, _) = transport(&base, None);

    MedicationService::new(transport)
        .delete("m1")
        .await
        .expect("204 counts as success");
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (transport, _, recorder) = transport(&format!("http://{addr}/api/v1"), None);
    let err = ReminderService::new(transport)
        .fetch_upcoming(30)
        .await
        .expect_err("no server");
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.message, "Failed to fetch upcoming reminders");
    assert!(recorder.routes.lock().expect("lock").is_empty());
}
