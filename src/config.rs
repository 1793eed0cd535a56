//! Application configuration
//!
//! Read from a TOML file (`~/.config/vendor-analytics/config.toml` by
//! default). Every section and key is optional; missing values take the
//! defaults below. `DATABASE_URL` and `SESSION_SECRET` override the file.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::application::{IdentitySettings, PasswordPolicy};
use crate::domain::analytics::period::parse_weekday;
use crate::infrastructure::crypto::SessionTokenConfig;
use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

pub const CONFIG_ENV: &str = "VENDOR_ANALYTICS_CONFIG";

const DEFAULT_SECRET: &str = "change-me-in-production";

/// Default config location: `<config dir>/vendor-analytics/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vendor-analytics")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        DatabaseConfig {
            url: section.url.clone(),
            max_connections: section.max_connections,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Key used to sign session tokens
    pub session_secret: String,
    pub session_hours: i64,
    /// Mark cookies `Secure` (serve over HTTPS)
    pub secure_cookies: bool,
    pub min_password_length: usize,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_secret: DEFAULT_SECRET.to_string(),
            session_hours: 12,
            secure_cookies: false,
            min_password_length: 8,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("session_secret", &"***")
            .field("session_hours", &self.session_hours)
            .field("secure_cookies", &self.secure_cookies)
            .field("min_password_length", &self.min_password_length)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl SecurityConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.session_secret == DEFAULT_SECRET
    }

    pub fn identity_settings(&self) -> IdentitySettings {
        IdentitySettings {
            tokens: SessionTokenConfig {
                secret: self.session_secret.clone(),
                expiration_hours: self.session_hours,
                ..SessionTokenConfig::default()
            },
            policy: PasswordPolicy::new(self.min_password_length),
            bcrypt_cost: self.bcrypt_cost,
        }
    }
}

/// Account created on first start when the user table is empty.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// First day of the week for "this week" metrics
    pub week_start: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            week_start: "monday".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn first_weekday(&self) -> Result<Weekday, InfraError> {
        parse_weekday(&self.week_start).ok_or_else(|| {
            InfraError::Config(format!("unknown week_start '{}'", self.week_start))
        })
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file is absent,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))
    }

    /// Apply `DATABASE_URL` and `SESSION_SECRET` from `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = lookup("SESSION_SECRET").filter(|v| !v.trim().is_empty()) {
            self.security.session_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        self.dashboard.first_weekday()?;
        if self.security.session_hours <= 0 {
            return Err(InfraError::Config(
                "security.session_hours must be positive".to_string(),
            ));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(InfraError::Config(
                "security.bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(InfraError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.url, "sqlite://./vendor-analytics.db?mode=rwc");
        assert_eq!(config.logging.format, "text");
        assert_eq!(config.dashboard.first_weekday().unwrap(), Weekday::Mon);
        assert!(config.security.uses_default_secret());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [dashboard]
            week_start = "sunday"

            [security]
            session_hours = 2
            secure_cookies = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dashboard.first_weekday().unwrap(), Weekday::Sun);
        assert!(config.security.secure_cookies);
        assert_eq!(config.security.min_password_length, 8);

        let identity = config.security.identity_settings();
        assert_eq!(identity.tokens.expiration_hours, 2);
        assert_eq!(identity.tokens.issuer, "vendor-analytics");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "SESSION_SECRET" => Some("s3cret".to_string()),
            _ => None,
        });
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.security.session_secret, "s3cret");
        assert!(!config.security.uses_default_secret());
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert!(config.security.uses_default_secret());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::default();
        config.dashboard.week_start = "someday".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.security.session_hours = 0;
        assert!(config.validate().is_err());

        assert!(AppConfig::from_toml("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("vendor-analytics-missing-config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let text = format!("{:?}", AppConfig::default());
        assert!(!text.contains(DEFAULT_SECRET));
        assert!(text.contains("***"));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("vendor-analytics/config.toml"));
    }
}
