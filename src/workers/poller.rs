//! Dashboard worker: background polling plus user commands
//!
//! A single task owns the [`DashboardController`], so polls and commands never
//! interleave and the cached list needs no locking.

use super::core::{DashboardCommand, EventSender, WorkerConfig};
use crate::api::TransactionApi;
use crate::dashboard::{DashboardController, DashboardView};
use crate::events::EventType;
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior, sleep_until};

pub struct DashboardWorker {
    controller: DashboardController,
    event_sender: EventSender,
    config: WorkerConfig,
    /// List length seen by the previous successful poll
    last_count: Option<usize>,
}

impl DashboardWorker {
    pub fn new(
        api: Box<dyn TransactionApi>,
        event_sender: EventSender,
        config: WorkerConfig,
    ) -> (Self, watch::Receiver<DashboardView>) {
        let (controller, view_receiver) = DashboardController::new(api, config.page_size);
        let worker = Self {
            controller,
            event_sender,
            config,
            last_count: None,
        };
        (worker, view_receiver)
    }

    /// Poll on a fixed interval and execute commands until shutdown or until the
    /// command channel closes. The first poll happens immediately.
    ///
    /// Shutdown is checked before any other ready branch, so nothing queued behind
    /// it reaches the API.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<DashboardCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut follow_up: Option<Instant> = None;

        loop {
            let deadline = follow_up;
            let follow_up_due = async move {
                match deadline {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                biased;

                _ = shutdown.recv() => break,
                _ = ticker.tick() => self.poll().await,
                _ = follow_up_due => {
                    follow_up = None;
                    self.poll().await;
                }
                command = commands.recv() => match command {
                    Some(command) => {
                        if let Some(delay) = self.handle_command(command).await {
                            let due = Instant::now() + delay;
                            follow_up = Some(follow_up.map_or(due, |current| current.max(due)));
                        }
                    }
                    None => break,
                },
            }
        }
    }

    async fn poll(&mut self) {
        match self.controller.refresh().await {
            Ok(count) => {
                let previous = self.last_count.replace(count);
                let (msg, log_level) = match previous {
                    Some(previous) if previous == count => {
                        (format!("Refreshed: {} transactions", count), LogLevel::Debug)
                    }
                    _ => (format!("Loaded {} transactions", count), LogLevel::Info),
                };
                self.event_sender
                    .send_poll_event(msg, EventType::Refresh, log_level)
                    .await;
            }
            Err(e) => {
                let msg = self
                    .controller
                    .last_error()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string());
                self.event_sender
                    .send_poll_event(msg, EventType::Error, e.log_level())
                    .await;
            }
        }
    }

    /// Execute one command. Returns a delay after which the list should be re-fetched.
    async fn handle_command(&mut self, command: DashboardCommand) -> Option<Duration> {
        match command {
            DashboardCommand::Refresh => {
                self.poll().await;
                None
            }
            DashboardCommand::GoToPage(page) => {
                self.controller.go_to_page(page);
                None
            }
            DashboardCommand::NextPage => {
                self.controller.next_page();
                None
            }
            DashboardCommand::PreviousPage => {
                self.controller.previous_page();
                None
            }
            DashboardCommand::FirstPage => {
                self.controller.first_page();
                None
            }
            DashboardCommand::LastPage => {
                self.controller.last_page();
                None
            }
            DashboardCommand::Simulate { count, interval_ms } => {
                self.simulate(count, interval_ms).await
            }
            DashboardCommand::SimulateDirect { count } => {
                self.simulate_direct(count).await;
                None
            }
            DashboardCommand::Clear => {
                self.clear().await;
                None
            }
        }
    }

    async fn simulate(&mut self, count: u32, interval_ms: u64) -> Option<Duration> {
        self.event_sender
            .send_command_event(
                format!(
                    "Requesting {} simulated transactions ({} ms apart)...",
                    count, interval_ms
                ),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        match self.controller.simulate(count, interval_ms).await {
            Ok(delay) => {
                self.event_sender
                    .send_command_event(
                        format!(
                            "Simulation scheduled - refreshing in {:.1}s",
                            delay.as_secs_f64()
                        ),
                        EventType::Waiting,
                        LogLevel::Info,
                    )
                    .await;
                Some(delay)
            }
            Err(e) => {
                self.event_sender
                    .send_command_event(
                        format!("Simulation failed: {}", e.user_message()),
                        EventType::Error,
                        e.log_level(),
                    )
                    .await;
                None
            }
        }
    }

    async fn simulate_direct(&mut self, count: u32) {
        match self.controller.simulate_direct(count).await {
            Ok(()) => {
                self.last_count = Some(self.controller.transactions().len());
                self.event_sender
                    .send_command_event(
                        format!("Generated {} transactions", count),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
                if let Some(error) = self.controller.last_error() {
                    let msg = error.to_string();
                    self.event_sender
                        .send_command_event(msg, EventType::Error, LogLevel::Warn)
                        .await;
                }
            }
            Err(e) => {
                self.event_sender
                    .send_command_event(
                        format!("Direct simulation failed: {}", e.user_message()),
                        EventType::Error,
                        e.log_level(),
                    )
                    .await;
            }
        }
    }

    async fn clear(&mut self) {
        match self.controller.clear().await {
            Ok(()) => {
                self.last_count = Some(0);
                self.event_sender
                    .send_command_event(
                        "Cleared all transactions".to_string(),
                        EventType::Success,
                        LogLevel::Info,
                    )
                    .await;
            }
            Err(e) => {
                self.event_sender
                    .send_command_event(
                        format!("Clear failed: {}", e.user_message()),
                        EventType::Error,
                        e.log_level(),
                    )
                    .await;
            }
        }
    }
}
