//! # API REST
//!
//! The interactive form surface of the MTRH registry.
//!
//! Handles:
//! - HTML form endpoints with axum (add, view, delete, download)
//! - CSV download responses
//! - A JSON liveness probe at `/health`
//!
//! Registry operations are synchronous and share one connection, so handlers take the registry
//! lock for the duration of a single operation and never across an `.await`.

#![warn(rust_2018_idioms)]

pub mod page;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

use api_shared::{AddPatientReq, HealthRes, HealthService, Notice, PatientIdReq};
use mtrh_core::{
    CoreConfig, PatientRegistry, RegistryError, RegistryResult, MSG_PATIENT_SAVED,
    MSG_RECORD_DELETED,
};
use page::{render_page, Page, Tab};

/// Application state shared across handlers.
///
/// `cfg` is kept outside the lock so rendering the page never waits on the database.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    registry: Arc<Mutex<PatientRegistry>>,
}

impl AppState {
    pub fn new(registry: PatientRegistry) -> Self {
        Self {
            cfg: registry.config().clone(),
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    fn with_registry<T>(
        &self,
        op: impl FnOnce(&PatientRegistry) -> RegistryResult<T>,
    ) -> Result<T, Failure> {
        let registry = self.registry.lock().map_err(|_| Failure::LockPoisoned)?;
        op(&registry).map_err(Failure::Registry)
    }

    fn render(&self, page: &Page<'_>) -> String {
        render_page(self.cfg.clinics().names(), page)
    }
}

enum Failure {
    Registry(RegistryError),
    LockPoisoned,
}

impl Failure {
    fn status(&self) -> StatusCode {
        match self {
            Failure::Registry(RegistryError::MissingInput(_))
            | Failure::Registry(RegistryError::UnknownClinic(_))
            | Failure::Registry(RegistryError::InvalidAge(_))
            | Failure::Registry(RegistryError::InvalidGender(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Failure::Registry(RegistryError::NotFound)
            | Failure::Registry(RegistryError::EmptyExport) => StatusCode::NOT_FOUND,
            Failure::Registry(_) | Failure::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn notice(&self) -> Notice {
        match self {
            Failure::Registry(err) => Notice::from(err),
            Failure::LockPoisoned => {
                tracing::error!("patient registry lock poisoned");
                Notice::error(api_shared::notice::MSG_INTERNAL_FAILURE)
            }
        }
    }

    fn into_page(self, state: &AppState, tab: Tab) -> Response {
        let body = state.render(&Page::with_notice(tab, self.notice()));
        (self.status(), Html(body)).into_response()
    }
}

/// Build the router for the form surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/patients", post(add_patient))
        .route("/patients/view", get(view_patient))
        .route("/patients/delete", post(delete_patient))
        .route("/export", get(export_all))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[axum::debug_handler]
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.render(&Page::default()))
}

/// Register a new patient from the Add form.
///
/// The generated row id is deliberately not shown to the operator.
#[axum::debug_handler]
async fn add_patient(State(state): State<AppState>, Form(req): Form<AddPatientReq>) -> Response {
    match state.with_registry(|registry| registry.add_patient(&req)) {
        Ok(_id) => {
            let page = Page::with_notice(Tab::Add, Notice::success(MSG_PATIENT_SAVED));
            Html(state.render(&page)).into_response()
        }
        Err(failure) => failure.into_page(&state, Tab::Add),
    }
}

/// Look up the first record for a patient id and show it as a summary.
#[axum::debug_handler]
async fn view_patient(State(state): State<AppState>, Query(req): Query<PatientIdReq>) -> Response {
    match state.with_registry(|registry| registry.view_patient(req.patient_id())) {
        Ok(record) => {
            let page = Page {
                tab: Tab::View,
                notice: None,
                record: Some(&record),
            };
            Html(state.render(&page)).into_response()
        }
        Err(failure) => failure.into_page(&state, Tab::View),
    }
}

/// Delete every record for a patient id. Success is reported whether or not rows matched.
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<AppState>,
    Form(req): Form<PatientIdReq>,
) -> Response {
    match state.with_registry(|registry| registry.delete_patient(req.patient_id())) {
        Ok(_deleted) => {
            let page = Page::with_notice(Tab::Delete, Notice::success(MSG_RECORD_DELETED));
            Html(state.render(&page)).into_response()
        }
        Err(failure) => failure.into_page(&state, Tab::Delete),
    }
}

/// Download the whole table as a CSV attachment.
#[axum::debug_handler]
async fn export_all(State(state): State<AppState>) -> Response {
    let export = match state.with_registry(|registry| registry.export_all()) {
        Ok(export) => export,
        Err(failure) => return failure.into_page(&state, Tab::Export),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            format!("{}; charset=utf-8", export.content_type),
        )
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        )
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(export.into_bytes()))
        .unwrap_or_else(|_| {
            (StatusCode::INTERNAL_SERVER_ERROR, "Response build failed").into_response()
        })
}
