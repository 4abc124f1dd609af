//! Session setup and initialization

use crate::api::ApiClient;
use crate::config::Config;
use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE, ITEMS_PER_PAGE};
use crate::dashboard::DashboardView;
use crate::environment::Environment;
use crate::events::Event;
use crate::workers::core::{DashboardCommand, EventSender, WorkerConfig};
use crate::workers::poller::DashboardWorker;
use std::error::Error;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// Session data for both TUI and headless modes
#[derive(Debug)]
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Latest dashboard snapshot published by the worker
    pub view_receiver: watch::Receiver<DashboardView>,
    /// Sends UI commands to the worker; dropping it stops the worker
    pub command_sender: mpsc::Sender<DashboardCommand>,
    /// Join handles for worker tasks
    pub join_handles: Vec<JoinHandle<()>>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// API deployment the session talks to
    pub environment: Environment,
    /// Resolved configuration (simulation defaults, poll interval)
    pub config: Config,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the API client
/// 2. Sets up event, command, view and shutdown channels
/// 3. Spawns the dashboard worker
///
/// # Arguments
/// * `config` - Resolved configuration
/// * `env` - API deployment to connect to
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The HTTP client could not be created
pub async fn setup_session(config: Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let config = config.normalized();
    let api_client = ApiClient::new(env.clone())?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel(COMMAND_QUEUE_SIZE);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let worker_config = WorkerConfig::new(
        Duration::from_millis(config.poll_interval_ms),
        ITEMS_PER_PAGE,
    );
    let (worker, view_receiver) = DashboardWorker::new(
        Box::new(api_client),
        EventSender::new(event_sender),
        worker_config,
    );
    let handle = tokio::spawn(worker.run(command_receiver, shutdown_sender.subscribe()));

    Ok(SessionData {
        event_receiver,
        view_receiver,
        command_sender,
        join_handles: vec![handle],
        shutdown_sender,
        environment: env,
        config,
    })
}
