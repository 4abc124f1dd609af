//! Payments API Client
//!
//! A reqwest client for the payments backend: listing, simulating and clearing transactions.

use crate::api::TransactionApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::polling;
use crate::environment::Environment;
use crate::transaction::Transaction;
use log::debug;
use reqwest::{Client, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("payments-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        Ok(Self {
            client: ClientBuilder::new()
                .connect_timeout(polling::request_timeout())
                .timeout(polling::request_timeout())
                .user_agent(USER_AGENT)
                .build()?,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn send(&self, method: Method, endpoint: &str) -> Result<Response, ApiError> {
        let url = self.build_url(endpoint);
        debug!("{} {}", method, url);
        let response = self.client.request(method, &url).send().await?;
        Self::handle_response_status(response).await
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, endpoint).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn request_no_response(&self, method: Method, endpoint: &str) -> Result<(), ApiError> {
        self.send(method, endpoint).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransactionApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_request("transactions").await
    }

    async fn simulate(&self, count: u32, interval_ms: u64) -> Result<(), ApiError> {
        let endpoint = format!("simulate?count={}&interval_ms={}", count, interval_ms);
        self.request_no_response(Method::POST, &endpoint).await
    }

    async fn simulate_direct(&self, count: u32) -> Result<(), ApiError> {
        let endpoint = format!("simulate-direct?count={}", count);
        self.request_no_response(Method::POST, &endpoint).await
    }

    async fn clear_transactions(&self) -> Result<(), ApiError> {
        self.request_no_response(Method::DELETE, "transactions")
            .await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Endpoints are joined to the base URL with exactly one slash.
    fn test_build_url() {
        let client = ApiClient::new(Environment::Custom {
            api_url: "http://api.example.com/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("/transactions"),
            "http://api.example.com/transactions"
        );
        assert_eq!(
            client.build_url("simulate?count=3&interval_ms=10"),
            "http://api.example.com/simulate?count=3&interval_ms=10"
        );
    }

    #[tokio::test]
    /// A request to a closed port surfaces as a transport error, not a panic.
    async fn test_unreachable_backend_is_a_reqwest_error() {
        let client = ApiClient::new(Environment::Custom {
            api_url: "http://127.0.0.1:9".to_string(),
        })
        .unwrap();
        let result = client.list_transactions().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
