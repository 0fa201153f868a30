use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Company, ValidationError};

/// A computer record, optionally attached to its manufacturer.
///
/// `id` is zero until the row has been created; the DAO writes the
/// generated key back on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Computer {
    pub id: i64,
    pub name: String,
    pub introduced: Option<NaiveDate>,
    pub discontinued: Option<NaiveDate>,
    pub company: Option<Company>,
}

impl Computer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            introduced: None,
            discontinued: None,
            company: None,
        }
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company.as_ref().map(|c| c.id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName("computer"));
        }

        if let (Some(introduced), Some(discontinued)) = (self.introduced, self.discontinued) {
            if discontinued < introduced {
                return Err(ValidationError::DiscontinuedBeforeIntroduced {
                    introduced,
                    discontinued,
                });
            }
        }

        Ok(())
    }
}
