//! Router and trigger endpoints.

use crate::admin;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use jobscout_scanner::RunSummary;
use jobscout_scheduler::{RunRecord, TriggerSource};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Build the router served by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/scrape", post(trigger_scrape))
        .route("/api/scrape/last", get(last_run))
        .route("/api/jobs", get(admin::list_jobs))
        .route(
            "/api/companies",
            get(admin::list_companies).post(admin::add_company),
        )
        .route("/api/companies/toggle", post(admin::toggle_company))
        .route("/api/companies/:id", delete(admin::delete_company))
        .route("/api/roles", get(admin::list_roles).post(admin::add_role))
        .route("/api/roles/toggle", post(admin::toggle_role))
        .route("/api/roles/:id", delete(admin::delete_role))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Job Automation API is running"
}

async fn trigger_scrape(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.runs.submit(TriggerSource::Manual)?;
    tracing::info!("Manual scrape accepted");
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Scrape started" })),
    ))
}

async fn last_run(State(state): State<AppState>) -> Json<Option<RunRecord<RunSummary>>> {
    Json(state.runs.last_run())
}
