use anyhow::{Context, Result};
use clap::Parser;
use todo_server::config::Config;
use todo_server::setup::{ensure_database_directory_from_config, initialize_app};
use todo_server::telemetry::{init_telemetry, log_config_validation, log_startup_info};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo list HTTP service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database URL override
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Listen address override
    #[arg(long, env = "LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Port override
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Log level override
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log file override (empty disables file logging)
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    if let Some(ref database_url) = cli.database_url {
        config.database.url = database_url.clone();
    }

    if let Some(ref listen_addr) = cli.listen_addr {
        config.server.listen_addr = listen_addr.clone();
    }

    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    if let Some(ref log_file) = cli.log_file {
        config.logging.file = log_file.clone();
    }

    Ok(config)
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Telemetry is not up yet, so configuration errors go to stderr
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation failed: {e:#}");
        std::process::exit(1);
    }

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;
    log_config_validation(&config);
    log_startup_info(&config);

    ensure_database_directory_from_config(&config)
        .context("Failed to create database directory")?;

    let server = initialize_app(&config)
        .await
        .context("Failed to initialize application")?;

    let addr = config.server_address();
    info!("Starting todo server on {}", addr);

    match server.serve(&addr, shutdown_signal()).await {
        Ok(()) => {
            info!("Todo server shut down cleanly");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Todo server error");
            std::process::exit(3);
        }
    }
}
