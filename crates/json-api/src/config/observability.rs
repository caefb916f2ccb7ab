//! Logging and Telemetry Config

use std::time::Duration;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default log level or filter directives (e.g. `info,dormitory_app=debug`)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Level for database driver events
    #[arg(long, env = "SQL_LOG_LEVEL", default_value = "warn")]
    pub sql_log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl LoggingConfig {
    /// Filter directives handed to the subscriber.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let sql = &self.sql_log_level;

        format!(
            "{},sqlx={sql},h2=warn,hyper=warn,tonic=warn,opentelemetry=warn",
            self.log_level
        )
    }
}

/// Tracing export and request timing settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces from incoming `traceparent` headers
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector endpoint
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_endpoint: String,

    /// OTLP export timeout in seconds
    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3_u64)]
    pub otel_timeout_secs: u64,

    /// Service name attached to exported spans
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "dormitory-json")]
    pub otel_service_name: String,

    /// Share of new traces to sample, between 0 and 1
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_sample_ratio: f64,

    /// Requests slower than this many milliseconds are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    /// Sample ratio clamped to `[0, 1]`.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.otel_sample_ratio.is_nan() {
            return 1.0;
        }

        self.otel_sample_ratio.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn export_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_timeout_secs)
    }

    /// Parent propagation only applies while spans are exported.
    #[must_use]
    pub fn propagates_parent(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}
