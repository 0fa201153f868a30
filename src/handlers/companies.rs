use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::error::{method_not_allowed, ApiError};
use super::extract::{AppJson, AppPath, AppQuery};
use super::AppState;
use crate::model::{Company, Direction, PageParameters, DEFAULT_PAGE_SIZE};

#[derive(Deserialize)]
pub struct CompanyForm {
    pub name: String,
}

/// Without `page`, `size` or `search` the whole list is returned unpaged.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub direction: Option<Direction>,
    pub search: Option<String>,
}

impl CompanyListParams {
    fn is_paged(&self) -> bool {
        self.page.is_some() || self.size.is_some() || self.search.is_some()
    }
}

impl From<CompanyListParams> for PageParameters {
    fn from(params: CompanyListParams) -> Self {
        PageParameters {
            page_number: params.page.unwrap_or(0),
            size: params.size.unwrap_or(DEFAULT_PAGE_SIZE),
            direction: params.direction.unwrap_or_default(),
            search: params.search,
            ..PageParameters::default()
        }
    }
}

async fn list_companies(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CompanyListParams>,
) -> Result<Response, ApiError> {
    if params.is_paged() {
        let page = state.companies.list_companies_page(params.into()).await?;
        Ok(Json(page).into_response())
    } else {
        let companies = state.companies.list_companies().await?;
        Ok(Json(companies).into_response())
    }
}

async fn retrieve(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<Json<Company>, ApiError> {
    state
        .companies
        .get_company(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("company not found: {id}")))
}

async fn add(
    State(state): State<AppState>,
    AppJson(form): AppJson<CompanyForm>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let company = state.companies.create_company(&form.name).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn update(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
    AppJson(form): AppJson<CompanyForm>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.companies.update_company(id, &form.name).await?))
}

/// DELETE /companies/:id - also removes the company's computers
async fn remove(
    AppPath(id): AppPath<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.companies.delete_company(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(list_companies).post(add).fallback(method_not_allowed),
        )
        .route(
            "/companies/:id",
            get(retrieve)
                .put(update)
                .delete(remove)
                .fallback(method_not_allowed),
        )
}
