use async_trait::async_trait;
use thiserror::Error;

use crate::model::PageParameters;

pub type DaoResult<T> = Result<T, DaoError>;

#[derive(Debug, Error)]
pub enum DaoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0} created but no id could be obtained")]
    MissingGeneratedKey(&'static str),
}

/// CRUD contract shared by every entity DAO.
///
/// Each call is exactly one round trip to the store.
#[async_trait]
pub trait Dao<T: Send + 'static>: Send + Sync {
    async fn find(&self, id: i64) -> DaoResult<Option<T>>;

    /// Insert `entity` and return it carrying the generated id.
    async fn create(&self, entity: T) -> DaoResult<T>;

    async fn update(&self, entity: T) -> DaoResult<T>;

    async fn delete(&self, id: i64) -> DaoResult<()>;

    /// Returns the number of rows removed. An empty slice does not hit the store.
    async fn delete_all(&self, ids: &[i64]) -> DaoResult<u64>;

    async fn find_all(&self) -> DaoResult<Vec<T>>;

    async fn find_page(&self, page: &PageParameters) -> DaoResult<Vec<T>>;

    async fn count(&self) -> DaoResult<i64>;
}

/// Log a store failure for `entity` before handing it up the stack.
pub(crate) fn logged(entity: &'static str) -> impl Fn(sqlx::Error) -> DaoError {
    move |err| {
        tracing::error!(entity, error = %err, "query failed");
        DaoError::Database(err)
    }
}

/// `?, ?, ?` for an `IN (...)` list of `n` bound values.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
