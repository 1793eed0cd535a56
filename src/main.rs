//! Vendor analytics dashboard server
//!
//! ```sh
//! # Run with default config (~/.config/vendor-analytics/config.toml)
//! vendor-analytics
//!
//! # Custom config path and port
//! vendor-analytics --config /etc/vendor-analytics/config.toml --port 8080
//!
//! # Validate config without starting
//! vendor-analytics --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use vendor_analytics::config::{default_config_path, AppConfig, CONFIG_ENV};
use vendor_analytics::server::{init_tracing, ServerHandle, ServerOptions};

/// Admin analytics dashboard for a vendor/product marketplace.
#[derive(Parser, Debug)]
#[command(name = "vendor-analytics", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the HTTP listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   Address     : {}", config.server.address());
                println!("   Database    : {}", config.database.url);
                println!("   Week start  : {}", config.dashboard.week_start);
                println!("   Log level   : {}", config.logging.level);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(level) = &cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(level) = &cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    ExitCode::SUCCESS
}
