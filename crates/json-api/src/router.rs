//! App Router

use salvo::Router;

use crate::{assignments, auth, dashboard, healthcheck, rooms};

/// Routes reachable without a bearer token.
fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("verify").post(auth::verify::handler))
                .push(Router::with_path("login").post(auth::login::handler)),
        )
        .push(
            Router::with_path("rooms/public")
                .get(rooms::public_index::handler)
                .push(Router::with_path("{room}").get(rooms::public_get::handler)),
        )
}

/// Routes behind the bearer token middleware. Admin checks happen per handler.
fn protected_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/me").get(auth::me::handler))
        .push(
            Router::with_path("rooms")
                .get(rooms::index::handler)
                .post(rooms::create::handler)
                .push(
                    Router::with_path("{room}")
                        .get(rooms::get::handler)
                        .put(rooms::update::handler)
                        .delete(rooms::delete::handler)
                        .push(Router::with_path("images").post(rooms::images::handler)),
                ),
        )
        .push(
            Router::with_path("assignments")
                .get(assignments::index::handler)
                .post(assignments::create::handler)
                .push(Router::with_path("pending").get(assignments::pending::handler))
                .push(
                    Router::with_path("print/transactions").get(assignments::print::handler),
                )
                .push(
                    Router::with_path("{assignment}")
                        .get(assignments::get::handler)
                        .put(assignments::update::handler)
                        .push(Router::with_path("checkout").put(assignments::checkout::handler)),
                ),
        )
        .push(Router::with_path("dashboard/stats").get(dashboard::stats::handler))
}

pub(crate) fn app_router() -> Router {
    Router::new().push(public_router()).push(protected_router())
}
