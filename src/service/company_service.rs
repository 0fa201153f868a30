use sqlx::SqlitePool;
use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::dao::{CompanyDao, ComputerDao, Dao};
use crate::model::{Company, Page, PageParameters, MAX_PAGE_SIZE};

#[derive(Clone)]
pub struct CompanyService {
    pool: SqlitePool,
    companies: CompanyDao,
    computers: ComputerDao,
}

impl CompanyService {
    pub fn new(pool: SqlitePool, companies: CompanyDao, computers: ComputerDao) -> Self {
        Self {
            pool,
            companies,
            computers,
        }
    }

    pub async fn get_company(&self, id: i64) -> ServiceResult<Option<Company>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.companies.find(id).await?)
    }

    pub async fn list_companies(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.companies.find_all().await?)
    }

    pub async fn list_companies_page(
        &self,
        mut params: PageParameters,
    ) -> ServiceResult<Page<Company>> {
        if params.size == 0 {
            return Ok(Page::new(Vec::new(), 0, &params));
        }
        params.size = params.size.min(MAX_PAGE_SIZE);

        let items = self.companies.find_page(&params).await?;
        let total = self.companies.count_matching(&params).await?;
        Ok(Page::new(items, total, &params))
    }

    pub async fn create_company(&self, name: &str) -> ServiceResult<Company> {
        let company = Company::new(0, name.trim());
        company.validate()?;
        Ok(self.companies.create(company).await?)
    }

    pub async fn update_company(&self, id: i64, name: &str) -> ServiceResult<Company> {
        if id <= 0 {
            return Err(ServiceError::NotFound(format!("company not found: {id}")));
        }
        let company = Company::new(id, name.trim());
        company.validate()?;
        Ok(self.companies.update(company).await?)
    }

    /// Delete a company together with its computers, atomically.
    pub async fn delete_company(&self, id: i64) -> ServiceResult<()> {
        if id <= 0 {
            return Err(ServiceError::NotFound(format!("company not found: {id}")));
        }

        let mut tx = self.pool.begin().await?;
        let removed = self.computers.delete_by_company_id(&mut *tx, id).await?;
        // Dropping `tx` on error rolls the computer deletions back.
        self.companies.delete_with(&mut *tx, id).await?;
        tx.commit().await?;

        info!(id, computers = removed, "deleted company and its computers");
        Ok(())
    }
}
