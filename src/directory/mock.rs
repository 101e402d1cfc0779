//! Mock directory implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::directory::errors::DirectoryResult;
use crate::directory::{CustomerReader, CustomerWriter};
use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;

mock! {
    pub Directory {}

    #[async_trait]
    impl CustomerReader for Directory {
        async fn list_customers(&self) -> DirectoryResult<Vec<Customer>>;
    }

    #[async_trait]
    impl CustomerWriter for Directory {
        async fn create_customer(&self, payload: &CustomerPayload) -> DirectoryResult<()>;
        async fn update_customer(
            &self,
            customer_id: CustomerId,
            payload: &CustomerPayload,
        ) -> DirectoryResult<()>;
        async fn delete_customer(&self, customer_id: CustomerId) -> DirectoryResult<()>;
    }
}
