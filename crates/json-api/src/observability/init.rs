//! Observability lifecycle.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Owns the tracer provider so it can be flushed on shutdown.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let observability = &config.observability;

        settings::apply(observability);

        let tracer_provider = if observability.otel_enabled {
            let provider = otel::build_tracer_provider(observability, &config.server.app_env)?;

            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(provider)
        } else {
            None
        };

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            otel_enabled = observability.otel_enabled,
            propagate_parent = observability.propagates_parent(),
            environment = %config.server.app_env,
            "logging initialised"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to flush spans on shutdown: {source}");
        }
    }
}
