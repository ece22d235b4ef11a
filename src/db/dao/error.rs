use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Db(#[from] DbErr),
    #[error("todo not found (id={id})")]
    NotFound { id: String },
}

pub type DaoResult<T> = Result<T, StoreError>;
