//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::clipboard::copy_to_clipboard;
use crate::consts::cli_consts::ui;
use crate::dashboard::DashboardView;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventType};
use crate::logging::LogLevel;
use crate::ui::dashboard::{DashboardState, KeyAction, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::core::DashboardCommand;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{broadcast, mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Initial value of the simulate count control
    pub simulate_count: u32,
    /// Initial value of the simulate interval control, in milliseconds
    pub simulate_interval_ms: u64,
    pub poll_interval_ms: u64,
}

impl UIConfig {
    pub fn new(
        with_background_color: bool,
        simulate_count: u32,
        simulate_interval_ms: u64,
        poll_interval_ms: u64,
    ) -> Self {
        Self {
            with_background_color,
            simulate_count,
            simulate_interval_ms,
            poll_interval_ms,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen with the transaction table.
    Dashboard,
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Dashboard state; kept up to date while the splash screen is showing.
    dashboard: DashboardState,

    /// Receives events from the dashboard worker.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Latest snapshot published by the dashboard worker.
    view_receiver: watch::Receiver<DashboardView>,

    /// Sends user commands to the dashboard worker.
    command_sender: mpsc::Sender<DashboardCommand>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        view_receiver: watch::Receiver<DashboardView>,
        command_sender: mpsc::Sender<DashboardCommand>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            dashboard: DashboardState::new(environment.clone(), ui_config),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            view_receiver,
            command_sender,
            shutdown_sender,
        }
    }

    /// Pull queued worker events and the newest view into the dashboard state.
    fn sync_from_worker(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.dashboard.add_event(event);
        }

        // An error here means the worker is gone; keep showing the last view.
        if self.view_receiver.has_changed().unwrap_or(false) {
            let view = self.view_receiver.borrow_and_update().clone();
            self.dashboard.set_view(view);
        }
    }

    fn send_command(&mut self, command: DashboardCommand) {
        let problem = match self.command_sender.try_send(command) {
            Ok(()) => return,
            Err(TrySendError::Full(_)) => "Still busy with earlier requests, try again",
            Err(TrySendError::Closed(_)) => "Dashboard worker has stopped",
        };
        // The worker will never answer, so the control must not stay locked
        self.dashboard.cancel_pending(command);
        self.dashboard.add_event(WorkerEvent::ui_with_level(
            problem.to_string(),
            EventType::Error,
            LogLevel::Warn,
        ));
    }

    /// Copy failures are only logged; the terminal may not support OSC 52.
    fn copy_id(&mut self, id: String) {
        let event = match copy_to_clipboard(&id) {
            Ok(()) => {
                let event = WorkerEvent::ui_with_level(
                    format!("Copied transaction ID {}", id),
                    EventType::Success,
                    LogLevel::Info,
                );
                self.dashboard.mark_copied(id);
                event
            }
            Err(e) => WorkerEvent::ui_with_level(
                format!("Could not copy transaction ID: {}", e),
                EventType::Error,
                LogLevel::Debug,
            ),
        };
        self.dashboard.add_event(event);
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    // UI event loop
    loop {
        app.sync_from_worker();
        app.dashboard.update();

        let api_url = app.environment.api_url();
        terminal.draw(|f| render(f, app.current_screen, &app.dashboard, &api_url))?;

        // Handle splash-to-dashboard transition
        if app.current_screen == Screen::Splash && splash_start.elapsed() >= ui::splash_duration()
        {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if app.current_screen == Screen::Splash {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    // Any other key skips the splash screen
                    app.current_screen = Screen::Dashboard;
                    continue;
                }

                match app.dashboard.handle_key(key.code) {
                    KeyAction::None => {}
                    KeyAction::Quit => {
                        // Send shutdown signal to workers
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    KeyAction::Send(command) => app.send_command(command),
                    KeyAction::Copy(id) => app.copy_id(id),
                }
            }
        }

        // Let the worker task make progress between frames
        tokio::task::yield_now().await;
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, state: &DashboardState, api_url: &str) {
    match screen {
        Screen::Splash => render_splash(f, api_url),
        Screen::Dashboard => render_dashboard(f, state),
    }
}
