use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::error::TimetableError;
use crate::planner::{GenerationStatus, Planner};
use crate::registration::{CommitOutcome, CourseRegistration, RegistrationId};
use crate::timetable::{resolve_slot, to_column_key, ColumnKey, Day, SlotType, TimetableGrid};

/// Shared by all handlers: one planner per server
pub struct AppState {
    pub planner: Planner,
    pub generate_delay: Duration,
}

impl AppState {
    pub fn new(generate_delay: Duration) -> Self {
        Self {
            planner: Planner::new(),
            generate_delay,
        }
    }
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ResponseError for TimetableError {
    fn status_code(&self) -> StatusCode {
        match self {
            TimetableError::Validation(_) | TimetableError::EmptyRegistrationSet => StatusCode::BAD_REQUEST,
            TimetableError::UnknownSlotCode(_) | TimetableError::RegistrationNotFound(_) => StatusCode::NOT_FOUND,
            TimetableError::ConflictDetected { .. }
            | TimetableError::CannotDeleteLast
            | TimetableError::GenerationInProgress
            | TimetableError::StaleGeneration => StatusCode::CONFLICT,
            TimetableError::Io(_) | TimetableError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            TimetableError::ConflictDetected { conflicts } => serde_json::to_value(conflicts).ok(),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ApiError {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        })
    }
}

#[derive(Serialize)]
pub struct OccurrenceResponse {
    day: Day,
    raw_time: String,
    column: Option<ColumnKey>,
}

#[derive(Serialize)]
pub struct SlotResponse {
    code: String,
    slot_type: SlotType,
    occurrences: Vec<OccurrenceResponse>,
}

#[derive(Deserialize)]
pub struct UpdateRequest {
    faculty_name: Option<String>,
    slot_combination: Option<String>,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    updated: bool,
    registration: CourseRegistration,
}

#[derive(Serialize)]
pub struct CommitResponse {
    registration: CourseRegistration,
    #[serde(flatten)]
    outcome: CommitOutcome,
}

#[derive(Serialize)]
pub struct TimetableResponse {
    status: GenerationStatus,
    columns: Vec<ColumnKey>,
    grid: Option<TimetableGrid>,
}

fn registration_or_404(state: &AppState, id: RegistrationId) -> Result<CourseRegistration, TimetableError> {
    state
        .planner
        .registration(id)
        .ok_or(TimetableError::RegistrationNotFound(id))
}

// Slot lookup endpoint
async fn get_slot(code: web::Path<String>) -> Result<HttpResponse, TimetableError> {
    let slot = resolve_slot(&code).ok_or_else(|| TimetableError::UnknownSlotCode(code.trim().to_uppercase()))?;
    let occurrences = slot
        .occurrences
        .iter()
        .map(|(day, raw_time)| OccurrenceResponse {
            day: *day,
            raw_time: raw_time.clone(),
            column: to_column_key(slot.slot_type, *day, raw_time),
        })
        .collect();

    Ok(HttpResponse::Ok().json(SlotResponse {
        code: slot.code.clone(),
        slot_type: slot.slot_type,
        occurrences,
    }))
}

async fn list_registrations(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.planner.registrations())
}

async fn add_registration(state: web::Data<AppState>) -> Result<HttpResponse, TimetableError> {
    let id = state.planner.add();
    let registration = registration_or_404(&state, id)?;
    Ok(HttpResponse::Created().json(registration))
}

async fn update_registration(
    id: web::Path<u64>,
    req: web::Json<UpdateRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, TimetableError> {
    let id = RegistrationId(id.into_inner());
    let updated = state.planner.update_fields(
        id,
        req.faculty_name.as_deref(),
        req.slot_combination.as_deref(),
    )?;

    let registration = registration_or_404(&state, id)?;
    Ok(HttpResponse::Ok().json(UpdateResponse { updated, registration }))
}

async fn commit_registration(id: web::Path<u64>, state: web::Data<AppState>) -> Result<HttpResponse, TimetableError> {
    let id = RegistrationId(id.into_inner());
    let outcome = state.planner.commit(id)?;
    let registration = registration_or_404(&state, id)?;
    Ok(HttpResponse::Ok().json(CommitResponse { registration, outcome }))
}

async fn edit_registration(id: web::Path<u64>, state: web::Data<AppState>) -> Result<HttpResponse, TimetableError> {
    let id = RegistrationId(id.into_inner());
    state.planner.edit(id)?;
    Ok(HttpResponse::Ok().json(registration_or_404(&state, id)?))
}

async fn delete_registration(id: web::Path<u64>, state: web::Data<AppState>) -> Result<HttpResponse, TimetableError> {
    state.planner.delete(RegistrationId(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

async fn get_conflicts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.planner.conflicts())
}

async fn generate_timetable(state: web::Data<AppState>) -> Result<HttpResponse, TimetableError> {
    let grid = state.planner.generate(state.generate_delay).await?;
    Ok(HttpResponse::Ok().json(grid))
}

async fn get_timetable(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(TimetableResponse {
        status: state.planner.status(),
        columns: ColumnKey::ALL.to_vec(),
        grid: state.planner.current_grid(),
    })
}

/// Registers the API routes on an app or test service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/slots/{code}", web::get().to(get_slot))
        .route("/api/registrations", web::get().to(list_registrations))
        .route("/api/registrations", web::post().to(add_registration))
        .route("/api/registrations/{id}", web::patch().to(update_registration))
        .route("/api/registrations/{id}", web::delete().to(delete_registration))
        .route("/api/registrations/{id}/commit", web::post().to(commit_registration))
        .route("/api/registrations/{id}/edit", web::post().to(edit_registration))
        .route("/api/conflicts", web::get().to(get_conflicts))
        .route("/api/timetable/generate", web::post().to(generate_timetable))
        .route("/api/timetable", web::get().to(get_timetable));
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config.generate_delay));

    info!(host = %config.host, port = config.port, "starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
