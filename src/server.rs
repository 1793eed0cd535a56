//! Server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection,
//! migrations, default admin bootstrap, the HTTP server and graceful
//! shutdown.

use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{AnalyticsService, IdentityService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::{
    init_database, DatabaseConfig, Migrator, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::common::CookieSettings;
use crate::interfaces::http::{create_router, AppState};
use crate::shared::errors::{AppError, InfraError};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the bootstrap admin if no user exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// ```rust,no_run
/// use vendor_analytics::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the server is listening on.
    pub port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    http_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, bootstrap and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;

        info!("Starting vendor analytics dashboard...");

        let first_weekday = app_cfg.dashboard.first_weekday()?;
        let identity_settings = app_cfg.security.identity_settings();
        if app_cfg.security.uses_default_secret() {
            warn!("security.session_secret is the built-in default; set SESSION_SECRET in production");
        }
        info!(
            "Sessions expire after {}h; weeks start on {}",
            identity_settings.tokens.expiration_hours, first_weekday
        );

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from(&app_cfg.database);
        let db = init_database(&db_config).await.map_err(InfraError::from)?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await.map_err(InfraError::from)?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let identity = Arc::new(IdentityService::new(repos.clone(), identity_settings));
        let analytics = Arc::new(AnalyticsService::new(repos.clone(), first_weekday));

        if opts.create_default_admin {
            create_default_admin(&identity, &app_cfg).await;
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── HTTP server ────────────────────────────────────────
        let router = create_router(AppState {
            identity,
            analytics,
            db: db.clone(),
            cookies: CookieSettings {
                secure: app_cfg.security.secure_cookies,
            },
            started_at: Arc::new(Instant::now()),
        });

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();
        info!("Dashboard listening on http://{}", addr);

        let http_shutdown = shutdown_signal.clone();
        let http_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            http_shutdown.wait().await;
            info!("HTTP server received shutdown signal");
        });

        let http_task = tokio::spawn(async move {
            if let Err(e) = http_server.await {
                error!("HTTP server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            port,
            db,
            shutdown,
            http_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for in-flight requests to drain, bounded by the shutdown timeout,
    /// then close the pool.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests...");

        match tokio::time::timeout(self.shutdown.timeout(), self.http_task).await {
            Ok(Ok(())) => info!("HTTP server stopped"),
            Ok(Err(e)) => error!("HTTP server task panicked: {}", e),
            Err(_) => warn!(
                "HTTP server did not stop within {}s",
                self.shutdown.timeout().as_secs()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.http_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin account if no users exist yet.
async fn create_default_admin(identity: &IdentityService, app_cfg: &AppConfig) {
    let admin = &app_cfg.admin;
    match identity
        .ensure_default_admin(&admin.username, &admin.email, &admin.password)
        .await
    {
        Ok(Some(user)) => {
            info!(username = %user.username, "Default admin created: {}", user.email);
            warn!("Please change the default admin password immediately!");
        }
        Ok(None) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
