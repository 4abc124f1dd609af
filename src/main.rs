mod api;
mod cli_messages;
mod clipboard;
mod config;
mod consts;
mod dashboard;
mod environment;
mod events;
mod logging;
mod session;
mod transaction;
mod ui;
mod workers;

use crate::api::{ApiClient, TransactionApi};
use crate::config::{API_URL_ENV_VAR, Config, get_config_path};
use crate::consts::cli_consts::{ITEMS_PER_PAGE, simulation};
use crate::dashboard::pagination::{compute_pagination, visible_slice};
use crate::environment::Environment;
use crate::logging::init_console_logger;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::transaction::TransactionStats;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the live transaction dashboard
    Start {
        /// Base URL of the payments API (overrides PAYMENTS_API_URL and the config file)
        #[arg(long, value_name = "URL", value_parser = parse_api_url)]
        api_url: Option<String>,

        /// Log dashboard activity to the console instead of drawing the UI
        #[arg(long = "headless", action = ArgAction::SetTrue)]
        headless: bool,

        /// Paint a dark background behind the dashboard
        #[arg(long = "with-background", action = ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Print one page of transactions
    List {
        /// Base URL of the payments API
        #[arg(long, value_name = "URL", value_parser = parse_api_url)]
        api_url: Option<String>,

        /// Page to print, clamped to the available pages
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Ask the API to generate test transactions
    Simulate {
        /// Base URL of the payments API
        #[arg(long, value_name = "URL", value_parser = parse_api_url)]
        api_url: Option<String>,

        /// Number of transactions to generate (1-100)
        #[arg(long)]
        count: Option<u32>,

        /// Milliseconds between generated transactions (0-5000)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Create the transactions immediately instead of scheduling them
        #[arg(long, action = ArgAction::SetTrue)]
        direct: bool,
    },
    /// Delete every transaction
    Clear {
        /// Base URL of the payments API
        #[arg(long, value_name = "URL", value_parser = parse_api_url)]
        api_url: Option<String>,
    },
    /// Save default settings to the config file
    Configure {
        /// Base URL of the payments API ("local" for the local backend)
        #[arg(long, value_name = "URL", value_parser = parse_api_url)]
        api_url: Option<String>,

        /// Default number of transactions per simulation
        #[arg(long)]
        count: Option<u32>,

        /// Default milliseconds between simulated transactions
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

fn parse_api_url(value: &str) -> Result<String, String> {
    value
        .parse::<Environment>()
        .map(|_| value.to_string())
        .map_err(|_| format!("'{}' is not \"local\" or an http(s) URL", value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();

    match args.command {
        Command::Start {
            api_url,
            headless,
            with_background,
        } => {
            let config = load_config(&config_path);
            let environment = resolve_environment(api_url.as_deref(), &config);
            let session = setup_session(config, environment).await?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::List { api_url, page } => {
            init_console_logger();
            let config = load_config(&config_path);
            let client = ApiClient::new(resolve_environment(api_url.as_deref(), &config))?;
            list(&client, page).await
        }
        Command::Simulate {
            api_url,
            count,
            interval_ms,
            direct,
        } => {
            init_console_logger();
            let config = load_config(&config_path);
            let client = ApiClient::new(resolve_environment(api_url.as_deref(), &config))?;
            let count = count
                .unwrap_or(config.simulate_count)
                .clamp(simulation::MIN_COUNT, simulation::MAX_COUNT);
            let interval_ms = interval_ms
                .unwrap_or(config.simulate_interval_ms)
                .min(simulation::MAX_INTERVAL_MS);
            simulate(&client, count, interval_ms, direct).await
        }
        Command::Clear { api_url } => {
            init_console_logger();
            let config = load_config(&config_path);
            let client = ApiClient::new(resolve_environment(api_url.as_deref(), &config))?;
            client.clear_transactions().await.map_err(|e| {
                print_cmd_error!("Failed to clear transactions", e.user_message().as_str());
                e
            })?;
            print_cmd_success!("Cleared all transactions", "{}", client.environment());
            Ok(())
        }
        Command::Configure {
            api_url,
            count,
            interval_ms,
        } => {
            let mut config = Config::load_or_default(&config_path)?;
            if api_url.is_some() {
                config.api_url = api_url;
            }
            if let Some(count) = count {
                config.simulate_count = count;
            }
            if let Some(interval_ms) = interval_ms {
                config.simulate_interval_ms = interval_ms;
            }
            let config = config.normalized();
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "Configuration saved",
                "{} (api: {}, count: {}, interval: {} ms)",
                config_path.display(),
                config.api_url.as_deref().unwrap_or("local"),
                config.simulate_count,
                config.simulate_interval_ms
            );
            Ok(())
        }
    }
}

/// Loads the config file, falling back to defaults when it is unreadable.
fn load_config(path: &Path) -> Config {
    Config::load_or_default(path)
        .unwrap_or_else(|e| {
            print_cmd_warn!(
                "Ignoring unreadable config file",
                "{}: {}",
                path.display(),
                e
            );
            Config::default()
        })
        .normalized()
}

/// `--api-url` wins over the environment variable, which wins over the config file.
fn resolve_environment(flag: Option<&str>, config: &Config) -> Environment {
    let from_env = std::env::var(API_URL_ENV_VAR).ok();
    Environment::resolve([flag, from_env.as_deref(), config.api_url.as_deref()])
}

async fn list(client: &dyn TransactionApi, page: usize) -> Result<(), Box<dyn Error>> {
    let transactions = client.list_transactions().await.map_err(|e| {
        print_cmd_error!("Failed to load transactions", e.user_message().as_str());
        e
    })?;
    let pagination = compute_pagination(transactions.len(), page, ITEMS_PER_PAGE);
    let stats = TransactionStats::from_transactions(&transactions);

    print_cmd_info!(
        "Transactions",
        "{} total, {} approved, {} rejected, {} pending",
        stats.total,
        stats.approved,
        stats.rejected,
        stats.pending
    );
    if transactions.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }
    for transaction in visible_slice(&transactions, &pagination) {
        println!("{}", transaction);
    }
    println!(
        "Showing {}-{} of {} - Page {} of {}",
        pagination.start + 1,
        pagination.end,
        pagination.total_items,
        pagination.current_page,
        pagination.total_pages
    );
    Ok(())
}

async fn simulate(
    client: &dyn TransactionApi,
    count: u32,
    interval_ms: u64,
    direct: bool,
) -> Result<(), Box<dyn Error>> {
    if direct {
        client.simulate_direct(count).await.map_err(|e| {
            print_cmd_error!("Failed to create transactions", e.user_message().as_str());
            e
        })?;
        print_cmd_success!("Created transactions", "{}", count);
    } else {
        client.simulate(count, interval_ms).await.map_err(|e| {
            print_cmd_error!("Failed to start simulation", e.user_message().as_str());
            e
        })?;
        print_cmd_success!(
            "Simulation started",
            "{} transactions, ready in about {:.1}s",
            count,
            simulation::follow_up_delay(count, interval_ms).as_secs_f64()
        );
    }
    Ok(())
}
