use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;

use crate::directory::errors::{DirectoryError, DirectoryResult, ErrorPayload};
use crate::directory::{CustomerReader, CustomerWriter};
use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;

/// Directory client speaking JSON over HTTP.
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    http: Client,
    base_url: String,
}

impl HttpDirectory {
    /// Client for the directory rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Same as [`HttpDirectory::new`] with a preconfigured client.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn customers_url(&self) -> String {
        format!("{}/customers", self.base_url)
    }

    fn customer_url(&self, customer_id: CustomerId) -> String {
        format!("{}/customers/{customer_id}", self.base_url)
    }
}

/// Passes 2xx responses through and turns everything else into
/// [`DirectoryError::Rejected`].
async fn ensure_success(response: Response) -> DirectoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let payload = serde_json::from_str::<ErrorPayload>(&body).unwrap_or_else(|err| {
        log::debug!("Error reply with status {status} is not a JSON payload: {err}");
        ErrorPayload::default()
    });

    Err(DirectoryError::rejected(status.as_u16(), payload))
}

/// Decodes list rows one by one; a row without a usable id is skipped.
fn decode_rows(rows: Vec<Value>) -> Vec<Customer> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Customer>(row) {
            Ok(customer) => Some(customer),
            Err(err) => {
                log::warn!("Skipping customer row the desk cannot use: {err}");
                None
            }
        })
        .collect()
}

#[async_trait]
impl CustomerReader for HttpDirectory {
    async fn list_customers(&self) -> DirectoryResult<Vec<Customer>> {
        let response = self.http.get(self.customers_url()).send().await?;
        let rows: Vec<Value> = ensure_success(response).await?.json().await?;
        Ok(decode_rows(rows))
    }
}

#[async_trait]
impl CustomerWriter for HttpDirectory {
    async fn create_customer(&self, payload: &CustomerPayload) -> DirectoryResult<()> {
        let response = self
            .http
            .post(self.customers_url())
            .json(payload)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn update_customer(
        &self,
        customer_id: CustomerId,
        payload: &CustomerPayload,
    ) -> DirectoryResult<()> {
        let response = self
            .http
            .patch(self.customer_url(customer_id))
            .json(payload)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_customer(&self, customer_id: CustomerId) -> DirectoryResult<()> {
        let response = self
            .http
            .delete(self.customer_url(customer_id))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
