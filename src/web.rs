use actix_web::{web, App, HttpServer, HttpResponse, Result, HttpRequest, middleware};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;
use crate::config::ServerConfig;
use crate::display::format_failure;
use crate::form::{validate_submission, PreferenceSubmission, ValidSubmission};
use crate::parser::load_preferences_from_reader;
use crate::schedule::{EmployeeLoad, Preference, ScheduleError, ScheduleReport, SchedulingEngine};

/// One scheduling session. Every request goes through the single engine lock.
pub struct AppState {
    pub engine: Mutex<SchedulingEngine>,
    pub admin_password: String,
}

impl AppState {
    pub fn new(engine: SchedulingEngine, admin_password: String) -> Self {
        Self { engine: Mutex::new(engine), admin_password }
    }

    fn engine(&self) -> Result<MutexGuard<'_, SchedulingEngine>> {
        self.engine
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("scheduling engine unavailable"))
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    name: String,
}

#[derive(Serialize)]
pub struct EmployeeView {
    name: String,
    preferences: Option<Preference>,
}

#[derive(Serialize)]
pub struct FailureResponse {
    success: bool,
    error: String,
    message: String,
    partial: Option<ScheduleReport>,
}

#[derive(Serialize)]
pub struct WorkloadResponse {
    workload: Vec<EmployeeLoad>,
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

async fn register_employee(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": "Employee name is required"})));
    }
    let mut engine = state.engine()?;
    engine.register(&req.name);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "employees": engine.employee_count()
    })))
}

async fn remove_employee(
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut engine = state.engine()?;
    if engine.remove_employee(name.as_str()) {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "Unknown employee"})))
    }
}

async fn list_employees(state: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = state.engine()?;
    let employees: Vec<EmployeeView> = engine
        .employees()
        .iter()
        .map(|name| EmployeeView {
            name: name.clone(),
            preferences: engine.employee_preferences(name).cloned(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(employees))
}

async fn add_preference(
    req: web::Json<PreferenceSubmission>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let submission = match validate_submission(&req) {
        Ok(valid) => valid,
        Err(e) => return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": e}))),
    };

    let mut engine = state.engine()?;
    match submission {
        ValidSubmission::Register(name) => engine.register(name),
        ValidSubmission::Prefer(name, day, shift) => engine.add_preference(name, day, shift),
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn get_preferences(
    name: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let engine = state.engine()?;
    if !engine.is_registered(name.as_str()) {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Unknown employee"})));
    }
    let preferences = engine
        .employee_preferences(name.as_str())
        .cloned()
        .unwrap_or_else(|| Preference::new(name.as_str()));
    Ok(HttpResponse::Ok().json(preferences))
}

async fn generate(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut engine = state.engine()?;
    match engine.generate() {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(err) => {
            let kind = match &err {
                ScheduleError::InsufficientStaff { .. } => "insufficient_staff",
                ScheduleError::StaffingShortfall { .. } => "staffing_shortfall",
                ScheduleError::InvalidSlot { .. } => "invalid_slot",
            };
            let partial = match &err {
                ScheduleError::StaffingShortfall { partial, .. } => Some(partial.as_ref().clone()),
                _ => None,
            };
            Ok(HttpResponse::UnprocessableEntity().json(FailureResponse {
                success: false,
                error: kind.to_string(),
                message: format_failure(&err),
                partial,
            }))
        }
    }
}

// Current slot contents and load, whatever the last cycle left behind
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = state.engine()?;
    Ok(HttpResponse::Ok().json(engine.snapshot()))
}

async fn get_workload(state: web::Data<AppState>) -> Result<HttpResponse> {
    let engine = state.engine()?;
    Ok(HttpResponse::Ok().json(WorkloadResponse { workload: engine.workload() }))
}

// Admin CSV upload endpoint
async fn admin_upload(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    // Check password from header
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let mut engine = state.engine()?;
    match load_preferences_from_reader(body.as_ref(), &mut engine) {
        Ok(summary) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "summary": summary
        }))),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        }))),
    }
}

/// Registers every API route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .service(
            web::resource("/api/employees")
                .route(web::get().to(list_employees))
                .route(web::post().to(register_employee)),
        )
        .service(web::resource("/api/employees/{name}").route(web::delete().to(remove_employee)))
        .route("/api/preferences", web::post().to(add_preference))
        .route("/api/preferences/{name}", web::get().to(get_preferences))
        .route("/api/generate", web::post().to(generate))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/workload", web::get().to(get_workload))
        .route("/api/upload", web::post().to(admin_upload));
}

pub async fn start_server(config: ServerConfig, engine: SchedulingEngine) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(engine, config.admin_password));
    info!(port = config.port, "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
