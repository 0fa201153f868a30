//! Inventory entities and the page parameters used to list them.

mod company;
mod computer;
mod page;

pub use company::Company;
pub use computer::Computer;
pub use page::{Direction, Order, Page, PageParameters, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} name must not be empty")]
    BlankName(&'static str),

    #[error("discontinued date {discontinued} precedes introduced date {introduced}")]
    DiscontinuedBeforeIntroduced {
        introduced: chrono::NaiveDate,
        discontinued: chrono::NaiveDate,
    },
}
