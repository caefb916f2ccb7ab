//! Per-request span, request ID and access log.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Probes and scrapes stay out of logs and metrics.
const UNTRACKED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// What the access log needs once the response is ready.
struct Completed<'a> {
    method: &'a str,
    route: &'a str,
    request_id: &'a str,
    status: StatusCode,
    elapsed: Duration,
}

impl Completed<'_> {
    fn log(&self) {
        let status = self.status.as_u16();
        let duration_ms = self.elapsed.as_millis();

        info!(status, duration_ms, "request.completed");

        if self.status.is_server_error() {
            error!(
                status,
                method = self.method,
                route = self.route,
                request_id = self.request_id,
                "server error response"
            );
        } else if self.status.is_client_error() {
            warn!(
                status,
                method = self.method,
                route = self.route,
                request_id = self.request_id,
                "client error response"
            );
        }

        let threshold_ms = settings::slow_request_ms();

        if duration_ms > u128::from(threshold_ms) {
            warn!(
                method = self.method,
                route = self.route,
                request_id = self.request_id,
                duration_ms,
                threshold_ms,
                "slow request"
            );
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACKED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());

    // `user_uuid` and `role` are recorded by the auth middleware.
    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.otel_path,
        remote_addr = %req.remote_addr(),
        user_uuid = tracing::field::Empty,
        role = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    continue_remote_trace(req, &span);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let completed = Completed {
        method: &method,
        route: &names.otel_path,
        request_id: &request_id,
        status: request_ids::response_status_or_ok(res.status_code),
        elapsed: started.elapsed(),
    };

    metrics::observe_request(
        completed.method,
        completed.route,
        completed.status.as_u16(),
        completed.elapsed.as_secs_f64(),
    );

    span.record("status", completed.status.as_u16());
    span.record("duration_ms", completed.elapsed.as_millis());
    span.in_scope(|| completed.log());
}

fn continue_remote_trace(req: &Request, span: &Span) {
    if !settings::propagate_parent() {
        return;
    }

    if let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to continue remote trace: {source}");
    }
}
