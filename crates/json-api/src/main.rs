//! Dormitory JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    serve_static::StaticDir,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use dormitory_app::context::{AppContext, AuthSettings};

use crate::{
    config::ServerConfig,
    extensions::set_expose_error_detail,
    observability::{Observability, metrics_handler, request_logging},
    state::State,
    uploads::UploadStore,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod assignments;
mod auth;
mod config;
mod dashboard;
mod extensions;
mod healthcheck;
mod observability;
mod rooms;
mod router;
mod shutdown;
mod state;
mod sweeper;
#[cfg(test)]
mod test_helpers;
mod uploads;

/// Dormitory JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    set_expose_error_detail(!config.server.is_production());

    let tz = match config.dashboard.time_zone() {
        Ok(tz) => tz,
        Err(tz_error) => {
            error!(
                "invalid dashboard time zone {:?}: {tz_error}",
                config.dashboard.dashboard_timezone
            );

            process::exit(1);
        }
    };

    let auth = AuthSettings {
        jwt_secret: config.auth.jwt_secret.clone(),
        token_ttl: config.auth.token_ttl(),
    };

    let app = match AppContext::from_database_url(&config.database.database_url, auth, tz).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let uploads = UploadStore::new(
        config.uploads.uploads_dir.clone(),
        config.uploads.upload_max_bytes,
    );

    if let Err(io_error) = uploads.ensure_dirs().await {
        error!(
            "failed to prepare uploads directory {}: {io_error}",
            uploads.root().display()
        );

        process::exit(1);
    }

    let sweeper = sweeper::spawn(app.auth.clone(), config.sweeper.interval());

    let static_files = StaticDir::new([uploads.root().to_path_buf()]);

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(State::shared(app, uploads)))
        .push(router::app_router());

    let doc = OpenApi::new("Dormitory API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("uploads/{**path}").get(static_files))
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, sweeper, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    observability.shutdown();
}
