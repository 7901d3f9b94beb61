//! linkqr CLI - short links and QR codes from the terminal

mod commands;
mod config;
mod logging;
mod session;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use commands::Commands;
use linkqr_http::{ClientError, LinkQrClientBuilder};
use session::{LoginPrompt, SessionStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error, info};

/// Exit status when the session is gone and login is required
const EXIT_UNAUTHENTICATED: i32 = 2;

#[derive(Parser)]
#[command(name = "linkqr")]
#[command(about = "Short links and QR codes")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Directory for the saved session and view state
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./linkqr.toml or ./config/linkqr.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true, env = "LINKQR_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.into())?;

    debug!("Starting linkqr");

    match run(cli).await {
        Ok(()) => {
            debug!("Command completed successfully");
        }
        Err(e) => {
            if matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Unauthenticated)) {
                std::process::exit(EXIT_UNAUTHENTICATED);
            }
            error!("Command failed: {e:#}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir);
    let client_config = config::load_client_config(cli.config.as_deref(), cli.base_url)?;

    let session = SessionStore::new(&data_dir, &client_config.base_url)?;
    let jar = session.load_jar()?;
    let prompt = LoginPrompt::default();

    let client = LinkQrClientBuilder::from_config(&client_config)
        .cookie_jar(jar.clone())
        .navigator(prompt.clone())
        .build()?;

    let mut view = config::load_view_state(&data_dir)?;
    let limit = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let result = with_timeout(limit, cli.command.execute(&client, &mut view)).await;

    // Saved even when the command failed or timed out.
    config::save_view_state(&data_dir, &view)?;
    if prompt.was_requested() {
        info!("Session expired, clearing saved cookies");
        session.clear()?;
    } else {
        session.save(&jar)?;
    }

    result
}

/// Run a command future, giving up after `limit` when one is set
async fn with_timeout<T>(
    limit: Option<Duration>,
    command: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        None => command.await,
        Some(limit) => tokio::time::timeout(limit, command)
            .await
            .map_err(|_| anyhow!("Command timed out after {} seconds", limit.as_secs()))?,
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
