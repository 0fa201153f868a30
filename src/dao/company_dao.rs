use async_trait::async_trait;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{info, warn};

use super::dao::{logged, placeholders, Dao, DaoError, DaoResult};
use crate::model::{Company, PageParameters};

const ENTITY: &str = "company";

const FIND_BY_ID: &str = "SELECT id, name FROM company WHERE id = ?";
const CREATE: &str = "INSERT INTO company (name) VALUES (?) RETURNING id";
const UPDATE: &str = "UPDATE company SET name = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM company WHERE id = ?";
const FIND_ALL: &str = "SELECT id, name FROM company ORDER BY name, id";
const COUNT: &str = "SELECT count(id) FROM company";
const COUNT_SEARCH: &str = "SELECT count(id) FROM company WHERE name LIKE ? ESCAPE '\\'";

#[derive(Clone)]
pub struct CompanyDao {
    pool: SqlitePool,
}

impl CompanyDao {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count_matching(&self, page: &PageParameters) -> DaoResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT_SEARCH)
            .bind(page.search_pattern())
            .fetch_one(&self.pool)
            .await
            .map_err(logged(ENTITY))
    }

    /// Delete on a caller-supplied executor, e.g. inside a transaction.
    pub async fn delete_with<'e, E>(&self, executor: E, id: i64) -> DaoResult<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query(DELETE)
            .bind(id)
            .execute(executor)
            .await
            .map_err(logged(ENTITY))?;

        if res.rows_affected() == 0 {
            warn!(id, "couldn't delete company");
            return Err(DaoError::NotFound { entity: ENTITY, id });
        }

        info!(id, "deleted company");
        Ok(())
    }
}

#[async_trait]
impl Dao<Company> for CompanyDao {
    async fn find(&self, id: i64) -> DaoResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if company.is_some() {
            info!(id, "found company");
        } else {
            warn!(id, "couldn't find company");
        }
        Ok(company)
    }

    async fn create(&self, mut company: Company) -> DaoResult<Company> {
        let id = sqlx::query_scalar::<_, i64>(CREATE)
            .bind(&company.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(logged(ENTITY))?
            .ok_or(DaoError::MissingGeneratedKey(ENTITY))?;

        company.id = id;
        info!(id, name = %company.name, "created company");
        Ok(company)
    }

    async fn update(&self, company: Company) -> DaoResult<Company> {
        let res = sqlx::query(UPDATE)
            .bind(&company.name)
            .bind(company.id)
            .execute(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if res.rows_affected() == 0 {
            warn!(id = company.id, "couldn't update company");
            return Err(DaoError::NotFound {
                entity: ENTITY,
                id: company.id,
            });
        }

        info!(id = company.id, "updated company");
        Ok(company)
    }

    async fn delete(&self, id: i64) -> DaoResult<()> {
        self.delete_with(&self.pool, id).await
    }

    async fn delete_all(&self, ids: &[i64]) -> DaoResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "DELETE FROM company WHERE id IN ({})",
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

        info!(deleted = res.rows_affected(), "deleted companies");
        Ok(res.rows_affected())
    }

    async fn find_all(&self) -> DaoResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(FIND_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        if companies.is_empty() {
            warn!("couldn't retrieve any companies");
        } else {
            info!(count = companies.len(), "retrieved companies");
        }
        Ok(companies)
    }

    /// Companies are always listed by name; only direction and search apply.
    async fn find_page(&self, page: &PageParameters) -> DaoResult<Vec<Company>> {
        let direction = page.direction.keyword();
        let sql = format!(
            "SELECT id, name FROM company WHERE name LIKE ? ESCAPE '\\' \
             ORDER BY name {direction}, id {direction} LIMIT ?, ?"
        );

        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(page.search_pattern())
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await
            .map_err(logged(ENTITY))?;

        info!(count = companies.len(), "retrieved companies");
        Ok(companies)
    }

    async fn count(&self) -> DaoResult<i64> {
        sqlx::query_scalar::<_, i64>(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(logged(ENTITY))
    }
}
