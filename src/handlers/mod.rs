//! HTTP surface: JSON handlers over the services.

mod companies;
mod computers;
mod error;
mod extract;

pub use error::ApiError;

use axum::Router;
use sqlx::SqlitePool;

use crate::dao::{CompanyDao, ComputerDao};
use crate::service::{CompanyService, ComputerService};

#[derive(Clone)]
pub struct AppState {
    pub computers: ComputerService,
    pub companies: CompanyService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let computer_dao = ComputerDao::new(pool.clone());
        let company_dao = CompanyDao::new(pool.clone());
        Self {
            computers: ComputerService::new(computer_dao.clone(), company_dao.clone()),
            companies: CompanyService::new(pool, company_dao, computer_dao),
        }
    }
}

/// Routes without rate limiting or CORS; `main` layers those on.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(computers::router())
        .merge(companies::router())
        .fallback(error::not_found)
        .with_state(state)
}
