use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::error::{method_not_allowed, ApiError};
use super::extract::{AppJson, AppPath, AppQuery};
use super::AppState;
use crate::model::{Computer, Page, PageParameters};
use crate::service::ComputerForm;

#[derive(Deserialize)]
pub struct DeleteComputersRequest {
    pub ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

/// GET /computers - paged, sorted, optionally filtered by name prefix
async fn list_computers(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParameters>,
) -> Result<Json<Page<Computer>>, ApiError> {
    Ok(Json(state.computers.list_computers(params).await?))
}

async fn retrieve(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Computer>, ApiError> {
    state
        .computers
        .get_computer(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("computer not found: {id}")))
}

async fn add(
    State(state): State<AppState>,
    AppJson(form): AppJson<ComputerForm>,
) -> Result<(StatusCode, Json<Computer>), ApiError> {
    let computer = state.computers.create_computer(form).await?;
    Ok((StatusCode::CREATED, Json(computer)))
}

async fn update(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(form): AppJson<ComputerForm>,
) -> Result<Json<Computer>, ApiError> {
    Ok(Json(state.computers.update_computer(id, form).await?))
}

async fn remove(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.computers.delete_computer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /computers/delete - bulk delete by id
async fn bulk_remove(
    State(state): State<AppState>,
    AppJson(req): AppJson<DeleteComputersRequest>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.computers.delete_computers(&req.ids).await?;
    Ok(Json(DeletedResponse { deleted }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/computers",
            get(list_computers).post(add).fallback(method_not_allowed),
        )
        .route(
            "/computers/delete",
            post(bulk_remove).fallback(method_not_allowed),
        )
        .route(
            "/computers/:id",
            get(retrieve)
                .put(update)
                .delete(remove)
                .fallback(method_not_allowed),
        )
}
