//! Dashboard service.

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;

use dormitory::dashboard::{ReportWindow, aggregate};

use crate::{
    database::Db,
    domain::dashboard::{
        errors::DashboardServiceError, models::DashboardStats,
        repository::PgDashboardRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgDashboardService {
    db: Db,
    repository: PgDashboardRepository,
    tz: TimeZone,
}

impl PgDashboardService {
    /// Buckets are cut on calendar days in `tz`.
    #[must_use]
    pub fn new(db: Db, tz: TimeZone) -> Self {
        Self {
            db,
            repository: PgDashboardRepository::new(),
            tz,
        }
    }
}

#[async_trait]
impl DashboardService for PgDashboardService {
    async fn get_stats(
        &self,
        now: Timestamp,
        month_offset: i32,
        year_offset: i32,
    ) -> Result<DashboardStats, DashboardServiceError> {
        let today = now.to_zoned(self.tz.clone()).date();
        let window = ReportWindow::relative_to(today, month_offset, year_offset)?;

        let mut tx = self.db.begin().await?;

        let overview = self.repository.overview(&mut tx).await?;
        let facts = self.repository.list_assignment_facts(&mut tx).await?;

        tx.commit().await?;

        let series = aggregate(&facts, &window, &self.tz)?;

        Ok(DashboardStats {
            overview,
            month: window.month_start(),
            year: window.year(),
            series,
        })
    }
}

#[automock]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Overview and activity series, shifted from `now` by whole months and years.
    async fn get_stats(
        &self,
        now: Timestamp,
        month_offset: i32,
        year_offset: i32,
    ) -> Result<DashboardStats, DashboardServiceError>;
}
