//! Dashboard controller
//!
//! Owns the cached transaction list and the current page, talks to the API,
//! and publishes a [`DashboardView`] snapshot after every state change.

use super::pagination::{Pagination, clamp_page, compute_pagination, visible_slice};
use crate::api::TransactionApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::simulation;
use crate::transaction::{Transaction, TransactionStats};
use chrono::{DateTime, Local};
use log::debug;
use std::time::Duration;
use tokio::sync::watch;

/// Requests currently in flight, used to disable the matching controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyState {
    pub simulating: bool,
    pub clearing: bool,
}

/// Immutable snapshot of everything the UI needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Transactions on the current page only
    pub visible: Vec<Transaction>,
    pub pagination: Pagination,
    /// Counts over the whole cached list
    pub stats: TransactionStats,
    pub last_error: Option<String>,
    pub busy: BusyState,
    /// Last successful list fetch
    pub last_refreshed: Option<DateTime<Local>>,
    /// Last list fetch, successful or not; the next poll is due one interval later
    pub last_attempt: Option<DateTime<Local>>,
    /// Simulate and direct-simulate requests finished so far, whatever their outcome
    pub simulations_finished: u64,
    /// Clear requests finished so far, whatever their outcome
    pub clears_finished: u64,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            visible: Vec::new(),
            pagination: compute_pagination(0, 1, crate::consts::cli_consts::ITEMS_PER_PAGE),
            stats: TransactionStats::default(),
            last_error: None,
            busy: BusyState::default(),
            last_refreshed: None,
            last_attempt: None,
            simulations_finished: 0,
            clears_finished: 0,
        }
    }
}

pub struct DashboardController {
    api: Box<dyn TransactionApi>,
    transactions: Vec<Transaction>,
    current_page: usize,
    page_size: usize,
    last_error: Option<String>,
    busy: BusyState,
    last_refreshed: Option<DateTime<Local>>,
    last_attempt: Option<DateTime<Local>>,
    simulations_finished: u64,
    clears_finished: u64,
    view_sender: watch::Sender<DashboardView>,
}

impl DashboardController {
    pub fn new(
        api: Box<dyn TransactionApi>,
        page_size: usize,
    ) -> (Self, watch::Receiver<DashboardView>) {
        let (view_sender, view_receiver) = watch::channel(DashboardView::default());
        let controller = Self {
            api,
            transactions: Vec::new(),
            current_page: 1,
            page_size: page_size.max(1),
            last_error: None,
            busy: BusyState::default(),
            last_refreshed: None,
            last_attempt: None,
            simulations_finished: 0,
            clears_finished: 0,
            view_sender,
        };
        controller.publish();
        (controller, view_receiver)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn busy(&self) -> BusyState {
        self.busy
    }

    pub fn pagination(&self) -> Pagination {
        compute_pagination(self.transactions.len(), self.current_page, self.page_size)
    }

    pub fn view(&self) -> DashboardView {
        let pagination = self.pagination();
        DashboardView {
            visible: visible_slice(&self.transactions, &pagination).to_vec(),
            pagination,
            stats: TransactionStats::from_transactions(&self.transactions),
            last_error: self.last_error.clone(),
            busy: self.busy,
            last_refreshed: self.last_refreshed,
            last_attempt: self.last_attempt,
            simulations_finished: self.simulations_finished,
            clears_finished: self.clears_finished,
        }
    }

    fn publish(&self) {
        self.view_sender.send_replace(self.view());
    }

    fn record_failure(&mut self, operation: &str, error: &ApiError) {
        self.last_error = Some(format!("{}: {}", operation, error.user_message()));
    }

    /// Fetch the full list and replace the cached copy.
    ///
    /// On failure the cached list is kept and the error is recorded for display.
    pub async fn refresh(&mut self) -> Result<usize, ApiError> {
        let result = self.api.list_transactions().await;
        self.last_attempt = Some(Local::now());
        match result {
            Ok(transactions) => {
                self.transactions = transactions;
                self.last_error = None;
                self.last_refreshed = self.last_attempt;

                let total_pages = self.pagination().total_pages;
                let clamped = clamp_page(self.current_page, total_pages);
                if clamped != self.current_page {
                    debug!(
                        "List shrank to {} pages, moving from page {} to {}",
                        total_pages, self.current_page, clamped
                    );
                    self.current_page = clamped;
                }
                self.publish();
                Ok(self.transactions.len())
            }
            Err(e) => {
                self.record_failure("Failed to fetch transactions", &e);
                self.publish();
                Err(e)
            }
        }
    }

    /// Move to page `page` if it exists. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let pagination = self.pagination();
        if !pagination.contains(page) || page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.publish();
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.current_page
            .checked_sub(1)
            .is_some_and(|page| self.go_to_page(page))
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        let last = self.pagination().total_pages;
        self.go_to_page(last)
    }

    /// Ask the server to generate transactions in the background.
    ///
    /// Returns how long to wait before the generated rows are expected to be visible.
    pub async fn simulate(&mut self, count: u32, interval_ms: u64) -> Result<Duration, ApiError> {
        let count = count.clamp(simulation::MIN_COUNT, simulation::MAX_COUNT);
        let interval_ms = interval_ms.min(simulation::MAX_INTERVAL_MS);

        self.last_error = None;
        self.busy.simulating = true;
        self.publish();

        let result = self.api.simulate(count, interval_ms).await;

        self.busy.simulating = false;
        self.simulations_finished += 1;
        if let Err(e) = &result {
            self.record_failure("Failed to simulate transactions", e);
        }
        self.publish();

        result.map(|()| simulation::follow_up_delay(count, interval_ms))
    }

    /// Generate transactions synchronously, then refresh the list.
    ///
    /// A failed refresh after a successful generation is recorded in `last_error`
    /// but does not fail the command.
    pub async fn simulate_direct(&mut self, count: u32) -> Result<(), ApiError> {
        let count = count.clamp(simulation::MIN_COUNT, simulation::MAX_COUNT);

        self.last_error = None;
        self.busy.simulating = true;
        self.publish();

        let result = self.api.simulate_direct(count).await;

        self.busy.simulating = false;
        self.simulations_finished += 1;
        match result {
            Ok(()) => {
                // refresh() publishes and records its own failure
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.record_failure("Failed to simulate transactions directly", &e);
                self.publish();
                Err(e)
            }
        }
    }

    /// Delete every transaction on the server and reset the local view.
    pub async fn clear(&mut self) -> Result<(), ApiError> {
        self.last_error = None;
        self.busy.clearing = true;
        self.publish();

        let result = self.api.clear_transactions().await;

        self.busy.clearing = false;
        self.clears_finished += 1;
        match &result {
            Ok(()) => {
                self.transactions.clear();
                self.current_page = 1;
            }
            Err(e) => self.record_failure("Failed to clear transactions", e),
        }
        self.publish();
        result
    }
}
