//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    dashboard::DashboardConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    sweeper::SweeperConfig,
    uploads::UploadsConfig,
};

pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod sweeper;
pub(crate) mod uploads;

/// Dormitory JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "dormitory-json", about = "Dormitory JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Uploaded file settings.
    #[command(flatten)]
    pub uploads: UploadsConfig,

    /// Reporting settings.
    #[command(flatten)]
    pub dashboard: DashboardConfig,

    /// Expired registration cleanup settings.
    #[command(flatten)]
    pub sweeper: SweeperConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
