//! Dashboard state management
//!
//! Contains the UI-side dashboard state: the latest snapshot from the worker
//! plus everything that only exists on screen (selection, inputs, dialogs).

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::DashboardView;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::transaction::Transaction;
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Dashboard state with the worker's latest view and local interaction state.
#[derive(Debug)]
pub struct DashboardState {
    /// The API deployment being displayed.
    pub environment: Environment,
    /// Latest snapshot published by the dashboard worker.
    pub view: DashboardView,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Interval between background refreshes, for the countdown gauge.
    pub poll_interval: Duration,
    /// Animation tick counter
    pub tick: usize,
    /// Number of transactions requested by the simulate controls.
    pub simulate_count: u32,
    /// Spacing requested by the simulate controls, in milliseconds.
    pub simulate_interval_ms: u64,

    /// Row highlighted in the table, relative to the visible page
    selected_row: usize,
    /// Whether the controls panel is expanded
    controls_visible: bool,
    /// Whether the clear-all confirmation dialog is open
    confirm_clear: bool,
    /// ID copied to the clipboard and when, for the "Copied!" marker
    copied: Option<(String, Instant)>,
    /// `simulations_finished` when a simulate command was sent and not yet answered
    pending_simulation: Option<u64>,
    /// `clears_finished` when a clear command was sent and not yet answered
    pending_clear: Option<u64>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, ui_config: UIConfig) -> Self {
        Self {
            environment,
            view: DashboardView::default(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            poll_interval: Duration::from_millis(ui_config.poll_interval_ms),
            tick: 0,
            simulate_count: ui_config.simulate_count,
            simulate_interval_ms: ui_config.simulate_interval_ms,
            selected_row: 0,
            controls_visible: false,
            confirm_clear: false,
            copied: None,
            pending_simulation: None,
            pending_clear: None,
        }
    }

    // Getter methods for private fields
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn confirm_clear(&self) -> bool {
        self.confirm_clear
    }

    pub fn copied_id(&self) -> Option<&str> {
        self.copied.as_ref().map(|(id, _)| id.as_str())
    }

    /// A simulation is running in the worker or still waiting in its queue.
    pub fn simulation_in_progress(&self) -> bool {
        self.view.busy.simulating || self.pending_simulation.is_some()
    }

    /// A clear is running in the worker or still waiting in its queue.
    pub fn clear_in_progress(&self) -> bool {
        self.view.busy.clearing || self.pending_clear.is_some()
    }

    pub fn pending_simulation(&self) -> Option<u64> {
        self.pending_simulation
    }

    pub fn pending_clear(&self) -> Option<u64> {
        self.pending_clear
    }

    /// The transaction under the cursor, if the page is not empty.
    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.view.visible.get(self.selected_row)
    }

    // Setter methods for private fields (for updaters)
    pub fn set_selected_row(&mut self, row: usize) {
        self.selected_row = row;
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    pub fn set_confirm_clear(&mut self, open: bool) {
        self.confirm_clear = open;
    }

    pub fn set_copied(&mut self, copied: Option<(String, Instant)>) {
        self.copied = copied;
    }

    pub fn set_pending_simulation(&mut self, finished: Option<u64>) {
        self.pending_simulation = finished;
    }

    pub fn set_pending_clear(&mut self, finished: Option<u64>) {
        self.pending_clear = finished;
    }

    pub fn copied_at(&self) -> Option<Instant> {
        self.copied.as_ref().map(|(_, at)| *at)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
