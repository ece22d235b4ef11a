pub mod error;
pub mod todo_dao;

pub use error::{DaoResult, StoreError};
pub use todo_dao::TodoDao;
