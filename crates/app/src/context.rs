//! App Context

use std::sync::Arc;

use jiff::{SignedDuration, tz::TimeZone};
use thiserror::Error;

use crate::{
    auth::{AuthService, LogNotifier, PgAuthService, TokenSigner, VerificationNotifier},
    database::{self, Db},
    domain::{
        assignments::{AssignmentsService, PgAssignmentsService},
        dashboard::{DashboardService, PgDashboardService},
        rooms::{PgRoomsService, RoomsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl: SignedDuration,
}

#[derive(Clone)]
pub struct AppContext {
    pub rooms: Arc<dyn RoomsService>,
    pub assignments: Arc<dyn AssignmentsService>,
    pub dashboard: Arc<dyn DashboardService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied before any service is built. `tz` sets
    /// the calendar used for reference numbers and reports.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        auth: AuthSettings,
        tz: TimeZone,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool);
        let notifier: Arc<dyn VerificationNotifier> = Arc::new(LogNotifier);

        Ok(Self {
            rooms: Arc::new(PgRoomsService::new(db.clone())),
            assignments: Arc::new(PgAssignmentsService::new(db.clone(), tz.clone())),
            dashboard: Arc::new(PgDashboardService::new(db.clone(), tz)),
            auth: Arc::new(PgAuthService::new(
                db,
                TokenSigner::new(&auth.jwt_secret, auth.token_ttl),
                notifier,
            )),
        })
    }
}
