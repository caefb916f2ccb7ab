//! Test context for service-level integration tests.

use jiff::tz::TimeZone;

use crate::{
    database::Db,
    domain::{
        assignments::PgAssignmentsService, dashboard::PgDashboardService, rooms::PgRoomsService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub rooms: PgRoomsService,
    pub assignments: PgAssignmentsService,
    pub dashboard: PgDashboardService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;
        let app_db = Db::new(db.pool().clone());

        Self {
            rooms: PgRoomsService::new(app_db.clone()),
            assignments: PgAssignmentsService::new(app_db.clone(), TimeZone::UTC),
            dashboard: PgDashboardService::new(app_db, TimeZone::UTC),
            db,
        }
    }

    /// A [`Db`] handle on this test's database.
    pub(crate) fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}
