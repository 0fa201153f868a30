//! Application facade: input checks and multi-step operations over the DAOs.

mod company_service;
mod computer_service;

pub use company_service::CompanyService;
pub use computer_service::{ComputerForm, ComputerService};

use thiserror::Error;

use crate::dao::DaoError;
use crate::model::ValidationError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Dao(DaoError),
}

impl From<DaoError> for ServiceError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound { entity, id } => {
                ServiceError::NotFound(format!("{entity} not found: {id}"))
            }
            other => ServiceError::Dao(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidArgument(err.to_string())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Dao(DaoError::Database(err))
    }
}
