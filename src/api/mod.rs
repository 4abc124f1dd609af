use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::transaction::Transaction;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The payments REST API, as seen by the dashboard.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TransactionApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the full transaction list.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Schedule generation of `count` transactions spaced by `interval_ms`.
    ///
    /// Returns as soon as the server has accepted the job; generation finishes later.
    async fn simulate(&self, count: u32, interval_ms: u64) -> Result<(), ApiError>;

    /// Generate `count` transactions and return once they exist.
    async fn simulate_direct(&self, count: u32) -> Result<(), ApiError>;

    /// Delete every transaction.
    async fn clear_transactions(&self) -> Result<(), ApiError>;
}
