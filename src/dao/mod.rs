//! Data access objects over the SQLite pool.

mod company_dao;
mod computer_dao;
#[allow(clippy::module_inception)]
mod dao;
mod rows;

pub use company_dao::CompanyDao;
pub use computer_dao::ComputerDao;
pub use dao::{Dao, DaoError, DaoResult};
