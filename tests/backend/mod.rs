//! In-process mock of the time-tracking backend
//!
//! Implements just enough of the API for the smoke suite: seeded accounts,
//! role checks, entity creation with generated ids and QR codes, and
//! check-in/check-out toggling on QR scans.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Role {
    Owner,
    Admin,
    User,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    statuses: Vec<Value>,
    companies: Vec<Value>,
    users: Vec<Value>,
    employees: Vec<Value>,
    time_entries: Vec<Value>,
    checked_in: HashSet<String>,
}

impl Store {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

type Shared = Arc<Mutex<Store>>;

/// Start the mock on an ephemeral port and return its base URL
pub async fn spawn() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn app() -> Router {
    let state: Shared = Arc::new(Mutex::new(Store::default()));

    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/status", get(list_status).post(create_status))
        .route("/api/auth/login", post(login))
        .route("/api/companies", get(list_companies).post(create_company))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/{id}/qr", get(employee_qr))
        .route("/api/time-entries", get(list_time_entries).post(create_time_entry))
        .route("/api/qr-scan", post(qr_scan))
        .route("/api/employee-summary", get(employee_summary))
        .route("/api/employee-months/{id}", get(employee_months))
        .route("/api/echo-headers", get(echo_headers).post(echo_headers))
        .route("/api/echo-body", any(echo_body))
        .route("/api/broken", get(broken))
        .route("/api/slow", get(slow))
        .with_state(state)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

/// Resolve the caller's role from the bearer token
///
/// No header is 403 and an unknown token is 401.
fn authenticate(headers: &HeaderMap) -> Result<Role, Response> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(detail(StatusCode::FORBIDDEN, "Not authenticated"));
    };
    match value.to_str().unwrap_or_default() {
        "Bearer token-owner" => Ok(Role::Owner),
        "Bearer token-admin" => Ok(Role::Admin),
        "Bearer token-user" => Ok(Role::User),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")),
    }
}

fn allow(headers: &HeaderMap, roles: &[Role]) -> Result<Role, Response> {
    let role = authenticate(headers)?;
    if roles.contains(&role) {
        Ok(role)
    } else {
        Err(detail(StatusCode::FORBIDDEN, "Insufficient permissions"))
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn create_status(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut store = state.lock().unwrap();
    let id = store.id("status");
    let status = json!({ "id": id, "client_name": body["client_name"] });
    store.statuses.push(status.clone());
    Json(status)
}

async fn list_status(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().statuses.clone()))
}

async fn login(Json(body): Json<Value>) -> Response {
    let account = (body["username"].as_str(), body["password"].as_str());
    let role = match account {
        (Some("owner"), Some("owner123")) => "owner",
        (Some("admin"), Some("admin123")) => "admin",
        (Some("user"), Some("user123")) => "user",
        _ => return detail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    Json(json!({
        "access_token": format!("token-{}", role),
        "token_type": "bearer",
        "user": { "username": role, "type": role },
    }))
    .into_response()
}

async fn list_companies(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner]) {
        return denied;
    }
    Json(Value::Array(state.lock().unwrap().companies.clone())).into_response()
}

async fn create_company(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner]) {
        return denied;
    }
    let mut store = state.lock().unwrap();
    let id = store.id("company");
    let company = json!({ "id": id, "name": body["name"] });
    store.companies.push(company.clone());
    Json(company).into_response()
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    Json(Value::Array(state.lock().unwrap().users.clone())).into_response()
}

async fn create_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner]) {
        return denied;
    }
    let mut store = state.lock().unwrap();
    let id = store.id("user");
    let user = json!({
        "id": id,
        "username": body["username"],
        "type": body["type"],
        "company_id": body["company_id"],
    });
    store.users.push(user.clone());
    Json(user).into_response()
}

async fn list_employees(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    Json(Value::Array(state.lock().unwrap().employees.clone())).into_response()
}

async fn create_employee(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let mut store = state.lock().unwrap();
    let id = store.id("employee");
    let employee = json!({
        "id": id,
        "name": body["name"],
        "company_id": body["company_id"],
        "qr_code": format!("QR-{}", id),
    });
    store.employees.push(employee.clone());
    Json(employee).into_response()
}

async fn employee_qr(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let store = state.lock().unwrap();
    match store.employees.iter().find(|e| e["id"] == id.as_str()) {
        Some(employee) => Json(json!({
            "employee_id": id,
            "qr_code": employee["qr_code"],
            "qr_image": "data:image/png;base64,AAAA",
        }))
        .into_response(),
        None => detail(StatusCode::NOT_FOUND, "Employee not found"),
    }
}

async fn list_time_entries(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    Json(Value::Array(state.lock().unwrap().time_entries.clone())).into_response()
}

fn hours_between(check_in: &Value, check_out: &Value) -> Option<f64> {
    let parse = |v: &Value| {
        chrono::NaiveDateTime::parse_from_str(v.as_str()?, "%Y-%m-%dT%H:%M:%S%.f").ok()
    };
    let span = parse(check_out)? - parse(check_in)?;
    Some(span.num_seconds() as f64 / 3600.0)
}

async fn create_time_entry(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let Some(total_hours) = hours_between(&body["check_in"], &body["check_out"]) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid timestamps");
    };
    let mut store = state.lock().unwrap();
    let id = store.id("entry");
    let entry = json!({
        "id": id,
        "employee_id": body["employee_id"],
        "check_in": body["check_in"],
        "check_out": body["check_out"],
        "total_hours": total_hours,
    });
    store.time_entries.push(entry.clone());
    Json(entry).into_response()
}

async fn qr_scan(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let mut store = state.lock().unwrap();
    let Some(employee) = store
        .employees
        .iter()
        .find(|e| e["qr_code"] == body["qr_code"])
        .cloned()
    else {
        return detail(StatusCode::NOT_FOUND, "Unknown QR code");
    };

    let id = employee["id"].as_str().unwrap_or_default().to_string();
    let action = if store.checked_in.remove(&id) {
        "check_out"
    } else {
        store.checked_in.insert(id);
        "check_in"
    };
    Json(json!({ "action": action, "employee_name": employee["name"] })).into_response()
}

async fn employee_summary(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let store = state.lock().unwrap();
    let mut hours: HashMap<String, f64> = HashMap::new();
    for entry in &store.time_entries {
        let id = entry["employee_id"].as_str().unwrap_or_default().to_string();
        *hours.entry(id).or_default() += entry["total_hours"].as_f64().unwrap_or(0.0);
    }
    let summaries: Vec<Value> = store
        .employees
        .iter()
        .map(|e| {
            let id = e["id"].as_str().unwrap_or_default();
            json!({ "employee_id": id, "name": e["name"], "total_hours": hours.get(id).copied().unwrap_or(0.0) })
        })
        .collect();
    Json(Value::Array(summaries)).into_response()
}

async fn employee_months(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = allow(&headers, &[Role::Owner, Role::Admin]) {
        return denied;
    }
    let store = state.lock().unwrap();
    let months: HashSet<String> = store
        .time_entries
        .iter()
        .filter(|e| e["employee_id"] == id.as_str())
        .filter_map(|e| e["check_in"].as_str().map(|s| s[..7].to_string()))
        .collect();
    Json(json!(months.into_iter().collect::<Vec<_>>())).into_response()
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "authorization": text(header::AUTHORIZATION),
        "content_type": text(header::CONTENT_TYPE),
    }))
}

async fn echo_body(method: Method, body: Bytes) -> Json<Value> {
    let text = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());
    Json(json!({ "method": method.as_str(), "body": text }))
}

async fn broken() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html>Bad Gateway</html>",
    )
        .into_response()
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "late": true }))
}
