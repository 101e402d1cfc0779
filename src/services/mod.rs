//! Services coordinating the desk's workflows.

use thiserror::Error;

use crate::directory::errors::DirectoryError;

pub mod banner;
pub mod customer_desk;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Entity not found")]
    NotFound,

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
