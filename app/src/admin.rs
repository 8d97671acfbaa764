//! Management endpoints for monitored companies, role keywords and stored jobs.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use jobscout_core::types::DEFAULT_TARGET_KIND;
use jobscout_core::{Posting, RoleFilter, Target};
use jobscout_db::{companies, jobs, roles};
use serde::Deserialize;
use serde_json::{json, Value};

/// Postings returned by `GET /api/jobs` when no limit is given.
const DEFAULT_JOBS_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct NewCompany {
    name: String,
    url: String,
    #[serde(default, alias = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewRole {
    keyword: String,
}

/// Body of the toggle endpoints.
#[derive(Debug, Deserialize)]
pub struct Toggle {
    id: String,
    active: bool,
}

fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<Vec<Posting>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_JOBS_LIMIT);
    Ok(Json(jobs::list_postings(state.db.pool(), limit).await?))
}

pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Target>>, ApiError> {
    Ok(Json(companies::list_companies(state.db.pool()).await?))
}

pub async fn add_company(
    State(state): State<AppState>,
    Json(body): Json<NewCompany>,
) -> Result<Json<Target>, ApiError> {
    let kind = body.kind.as_deref().unwrap_or(DEFAULT_TARGET_KIND);
    let company = companies::add_company(state.db.pool(), &body.name, &body.url, kind).await?;
    tracing::info!(company = %company.name, "Company added");
    Ok(Json(company))
}

pub async fn toggle_company(
    State(state): State<AppState>,
    Json(body): Json<Toggle>,
) -> Result<Json<Value>, ApiError> {
    companies::set_company_active(state.db.pool(), &body.id, body.active).await?;
    Ok(success())
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    companies::delete_company(state.db.pool(), &id).await?;
    Ok(success())
}

pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleFilter>>, ApiError> {
    Ok(Json(roles::list_roles(state.db.pool()).await?))
}

pub async fn add_role(
    State(state): State<AppState>,
    Json(body): Json<NewRole>,
) -> Result<Json<RoleFilter>, ApiError> {
    let role = roles::add_role(state.db.pool(), &body.keyword).await?;
    tracing::info!(keyword = %role.keyword, "Role added");
    Ok(Json(role))
}

pub async fn toggle_role(
    State(state): State<AppState>,
    Json(body): Json<Toggle>,
) -> Result<Json<Value>, ApiError> {
    roles::set_role_active(state.db.pool(), &body.id, body.active).await?;
    Ok(success())
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    roles::delete_role(state.db.pool(), &id).await?;
    Ok(success())
}
