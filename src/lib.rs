//! # Vendor Analytics
//!
//! Administrative analytics dashboard for a vendor/product marketplace.
//!
//! ## Architecture
//!
//! - **domain**: entities, value types, repository traits and the pure
//!   metric and calendar functions
//! - **application**: account and analytics services
//! - **infrastructure**: SeaORM entities, migrations and repositories;
//!   password hashing and session tokens
//! - **interfaces**: server-rendered HTTP pages
//! - **shared**: error types and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use interfaces::http::create_router;
