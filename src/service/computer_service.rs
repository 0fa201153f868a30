use chrono::NaiveDate;
use serde::Deserialize;

use super::{ServiceError, ServiceResult};
use crate::dao::{CompanyDao, ComputerDao, Dao};
use crate::model::{Company, Computer, Page, PageParameters, MAX_PAGE_SIZE};

/// Fields a client supplies to create or update a computer.
///
/// A missing or non-positive `company_id` means the computer has no company.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComputerForm {
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
}

#[derive(Clone)]
pub struct ComputerService {
    computers: ComputerDao,
    companies: CompanyDao,
}

impl ComputerService {
    pub fn new(computers: ComputerDao, companies: CompanyDao) -> Self {
        Self {
            computers,
            companies,
        }
    }

    /// Non-positive ids never reach the store.
    pub async fn get_computer(&self, id: i64) -> ServiceResult<Option<Computer>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.computers.find(id).await?)
    }

    pub async fn list_computers(
        &self,
        mut params: PageParameters,
    ) -> ServiceResult<Page<Computer>> {
        if params.size == 0 {
            return Ok(Page::new(Vec::new(), 0, &params));
        }
        params.size = params.size.min(MAX_PAGE_SIZE);

        let items = self.computers.find_page(&params).await?;
        let total = self.computers.count_matching(&params).await?;
        Ok(Page::new(items, total, &params))
    }

    pub async fn create_computer(&self, form: ComputerForm) -> ServiceResult<Computer> {
        let computer = self.build(0, form).await?;
        Ok(self.computers.create(computer).await?)
    }

    pub async fn update_computer(&self, id: i64, form: ComputerForm) -> ServiceResult<Computer> {
        if id <= 0 {
            return Err(ServiceError::NotFound(format!("computer not found: {id}")));
        }
        let computer = self.build(id, form).await?;
        Ok(self.computers.update(computer).await?)
    }

    pub async fn delete_computer(&self, id: i64) -> ServiceResult<()> {
        if id <= 0 {
            return Err(ServiceError::NotFound(format!("computer not found: {id}")));
        }
        Ok(self.computers.delete(id).await?)
    }

    pub async fn delete_computers(&self, ids: &[i64]) -> ServiceResult<u64> {
        if let Some(bad) = ids.iter().find(|id| **id <= 0) {
            return Err(ServiceError::InvalidArgument(format!(
                "invalid computer id: {bad}"
            )));
        }
        Ok(self.computers.delete_all(ids).await?)
    }

    async fn build(&self, id: i64, form: ComputerForm) -> ServiceResult<Computer> {
        let computer = Computer {
            id,
            name: form.name.trim().to_string(),
            introduced: form.introduced,
            discontinued: form.discontinued,
            company: self.resolve_company(form.company_id).await?,
        };
        computer.validate()?;
        Ok(computer)
    }

    async fn resolve_company(&self, company_id: Option<i64>) -> ServiceResult<Option<Company>> {
        match company_id {
            Some(id) if id > 0 => match self.companies.find(id).await? {
                Some(company) => Ok(Some(company)),
                None => Err(ServiceError::InvalidArgument(format!(
                    "no company with id {id}"
                ))),
            },
            _ => Ok(None),
        }
    }
}
