use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{info, warn};

use super::dao::{logged, placeholders, Dao, DaoError, DaoResult};
use super::rows::ComputerRow;
use crate::model::{Computer, PageParameters};

const ENTITY: &str = "computer";

const SELECT_JOINED: &str = "SELECT c.id, c.name, c.introduced, c.discontinued, \
     c.company_id, o.name AS company_name \
     FROM computer AS c LEFT JOIN company AS o ON c.company_id = o.id";

const CREATE: &str = "INSERT INTO computer (name, introduced, discontinued, company_id) \
     VALUES (?, ?, ?, ?) RETURNING id";

const UPDATE: &str =
    "UPDATE computer SET name = ?, introduced = ?, discontinued = ?, company_id = ? WHERE id = ?";

const DELETE: &str = "DELETE FROM computer WHERE id = ?";

const DELETE_BY_COMPANY: &str = "DELETE FROM computer WHERE company_id = ?";

const COUNT: &str = "SELECT count(id) FROM computer";

const COUNT_SEARCH: &str = "SELECT count(id) FROM computer WHERE name LIKE ? ESCAPE '\\'";

/// Build the paginated list statement for `page`.
///
/// Only the enum-provided index, column and direction are formatted in.
/// Binds, in order: name pattern, offset, size.
pub(crate) fn page_statement(page: &PageParameters) -> String {
    let column = page.order.column();
    let direction = page.direction.keyword();
    format!(
        "SELECT c.id, c.name, c.introduced, c.discontinued, c.company_id, o.name AS company_name \
         FROM computer AS c INDEXED BY {index} \
         LEFT JOIN company AS o ON c.company_id = o.id \
         WHERE c.name LIKE ? ESCAPE '\\' \
         ORDER BY c.{column} {direction}, c.id {direction} \
         LIMIT ?, ?",
        index = page.order.index(),
    )
}

#[derive(Clone)]
pub struct ComputerDao {
    pool: SqlitePool,
}

impl ComputerDao {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Number of computers whose name starts with the page's search prefix.
    pub async fn count_matching(&self, page: &PageParameters) -> DaoResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT_SEARCH)
            .bind(page.search_pattern())
            .fetch_one(&self.pool)
            .await
            .map_err(logged(ENTITY))
    }

    /// Remove every computer of a company. Runs on `executor` so callers
    /// can fold it into a transaction.
    pub async fn delete_by_company_id<'e, E>(&self, executor: E, company_id: i64) -> DaoResult<u64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query(DELETE_BY_COMPANY)
            .bind(company_id)
            .execute(executor)
            .await
            .map_err(logged(ENTITY))?;

        info!(company_id, deleted = res.rows_affected(), "deleted computers of company");
        Ok(res.rows_affected())
    }
}

#[async_trait]
impl Dao<Computer> for ComputerDao {
    async fn find(&self, id: i64) -> DaoResult<Option<Computer>> {
        let row = sqlx::query_as::<_, ComputerRow>(&format!("{SELECT_JOINED} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        match row {
            Some(row) => {
                info!(id, "found computer");
                Ok(Some(row.into()))
            }
            None => {
                warn!(id, "couldn't find computer");
                Ok(None)
            }
        }
    }

    async fn create(&self, mut computer: Computer) -> DaoResult<Computer> {
        let id = sqlx::query_scalar::<_, i64>(CREATE)
            .bind(&computer.name)
            .bind(computer.introduced)
            .bind(computer.discontinued)
            .bind(computer.company_id())
            .fetch_optional(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        let Some(id) = id else {
            tracing::error!(name = %computer.name, "computer created but no id could be obtained");
            return Err(DaoError::MissingGeneratedKey(ENTITY));
        };

        computer.id = id;
        info!(id, name = %computer.name, "created computer");
        Ok(computer)
    }

    async fn update(&self, computer: Computer) -> DaoResult<Computer> {
        let res = sqlx::query(UPDATE)
            .bind(&computer.name)
            .bind(computer.introduced)
            .bind(computer.discontinued)
            .bind(computer.company_id())
            .bind(computer.id)
            .execute(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if res.rows_affected() == 0 {
            warn!(id = computer.id, "couldn't update computer");
            return Err(DaoError::NotFound {
                entity: ENTITY,
                id: computer.id,
            });
        }

        info!(id = computer.id, "updated computer");
        Ok(computer)
    }

    async fn delete(&self, id: i64) -> DaoResult<()> {
        let res = sqlx::query(DELETE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if res.rows_affected() == 0 {
            warn!(id, "couldn't delete computer");
            return Err(DaoError::NotFound { entity: ENTITY, id });
        }

        info!(id, "deleted computer");
        Ok(())
    }

    async fn delete_all(&self, ids: &[i64]) -> DaoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM computer WHERE id IN ({})",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        let res = query
            .execute(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        info!(
            requested = ids.len(),
            deleted = res.rows_affected(),
            "deleted computers"
        );
        Ok(res.rows_affected())
    }

    async fn find_all(&self) -> DaoResult<Vec<Computer>> {
        let rows = sqlx::query_as::<_, ComputerRow>(&format!("{SELECT_JOINED} ORDER BY c.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        info!(count = rows.len(), "retrieved computers");
        Ok(rows.into_iter().map(Computer::from).collect())
    }

    async fn find_page(&self, page: &PageParameters) -> DaoResult<Vec<Computer>> {
        let rows = sqlx::query_as::<_, ComputerRow>(&page_statement(page))
            .bind(page.search_pattern())
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if rows.is_empty() {
            warn!(?page, "couldn't retrieve any computers");
        } else {
            info!(count = rows.len(), "retrieved computer(s)");
        }

        Ok(rows.into_iter().map(Computer::from).collect())
    }

    async fn count(&self) -> DaoResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(logged(ENTITY))
    }
}
