use chrono::NaiveDate;
use sqlx::FromRow;

use crate::model::{Company, Computer};

/// Flat shape of the computer/company join.
#[derive(Debug, FromRow)]
pub(crate) struct ComputerRow {
    pub id: i64,
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company_id: Option<i64>,
    pub company_name: Option<String>,
}

impl From<ComputerRow> for Computer {
    fn from(row: ComputerRow) -> Self {
        // A dangling company_id (no joined name) is reported as no company.
        let company = match (row.company_id, row.company_name) {
            (Some(id), Some(name)) => Some(Company { id, name }),
            _ => None,
        };

        Computer {
            id: row.id,
            name: row.name,
            introduced: row.introduced,
            discontinued: row.discontinued,
            company,
        }
    }
}
