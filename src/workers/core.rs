//! Core worker utilities and types

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use std::time::Duration;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_poll_event(&self, message: String, event_type: EventType, log_level: LogLevel) {
        self.send_event(Event::poller_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_command_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::command_with_level(message, event_type, log_level))
            .await;
    }
}

/// Requests the UI can make of the dashboard worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    Refresh,
    GoToPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    Simulate { count: u32, interval_ms: u64 },
    SimulateDirect { count: u32 },
    Clear,
}

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    pub page_size: usize,
}

impl WorkerConfig {
    pub fn new(poll_interval: Duration, page_size: usize) -> Self {
        Self {
            poll_interval,
            page_size,
        }
    }
}
