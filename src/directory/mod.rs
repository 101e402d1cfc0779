//! Access to the external customer directory.

use async_trait::async_trait;

use crate::directory::errors::DirectoryResult;
use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpDirectory;

#[async_trait]
pub trait CustomerReader {
    async fn list_customers(&self) -> DirectoryResult<Vec<Customer>>;
}

#[async_trait]
pub trait CustomerWriter {
    async fn create_customer(&self, payload: &CustomerPayload) -> DirectoryResult<()>;
    async fn update_customer(
        &self,
        customer_id: CustomerId,
        payload: &CustomerPayload,
    ) -> DirectoryResult<()>;
    async fn delete_customer(&self, customer_id: CustomerId) -> DirectoryResult<()>;
}

/// Full read/write access, shareable across handlers.
pub trait CustomerDirectory: CustomerReader + CustomerWriter + Send + Sync {}

impl<T> CustomerDirectory for T where T: CustomerReader + CustomerWriter + Send + Sync {}
