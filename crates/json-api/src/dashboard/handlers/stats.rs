//! Dashboard Stats Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    dashboard::{errors::into_status_error, models::DashboardStatsResponse},
    extensions::*,
    state::State,
};

fn offset(req: &Request, name: &str) -> Result<i32, StatusError> {
    match req.query::<String>(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .or_400(&format!("Invalid \"{name}\", expected a whole number")),
        _ => Ok(0),
    }
}

/// Dashboard Stats Handler
///
/// Headline figures plus daily and monthly activity. `monthOffset` and
/// `yearOffset` shift the reported month and year relative to today.
#[endpoint(
    tags("dashboard"),
    summary = "Dashboard Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard figures"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid offsets"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DashboardStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let month_offset = offset(req, "monthOffset")?;
    let year_offset = offset(req, "yearOffset")?;

    let stats = state
        .app
        .dashboard
        .get_stats(Timestamp::now(), month_offset, year_offset)
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dormitory::dashboard::{Bucket, DashboardError, DashboardSeries, Overview, Series};
    use dormitory_app::{
        auth::AuthenticatedUser,
        dashboard::{DashboardServiceError, MockDashboardService, models::DashboardStats},
    };

    use crate::test_helpers::{TEST_ADMIN, TEST_TENANT, TestServices, service_as};

    use super::*;

    fn make_service(user: AuthenticatedUser, dashboard: MockDashboardService) -> Service {
        service_as(
            user,
            TestServices::new().with_dashboard(dashboard),
            Router::with_path("dashboard/stats").get(handler),
        )
    }

    fn bucket(label: &str, income: i64, check_ins: u32) -> Bucket {
        Bucket {
            label: label.to_string(),
            income: Decimal::new(income, 0),
            check_ins,
            ..Bucket::default()
        }
    }

    fn make_stats() -> DashboardStats {
        DashboardStats {
            overview: Overview {
                total_rooms: 4,
                available_rooms: 2,
                occupied_rooms: 1,
                maintenance_rooms: 1,
                total_capacity: 8,
                total_occupied: 3,
                pending_assignments: 2,
                active_assignments: 3,
                tenants: 5,
            },
            month: date(2024, 3, 1),
            year: 2024,
            series: DashboardSeries {
                monthly: Series {
                    buckets: vec![bucket("1", 2_000, 1), bucket("2", 0, 0)],
                },
                yearly: Series {
                    buckets: vec![bucket("Jan", 500, 1), bucket("Mar", 2_000, 1)],
                },
            },
        }
    }

    #[tokio::test]
    async fn test_dashboard_stats_success() -> TestResult {
        let mut dashboard = MockDashboardService::new();

        dashboard
            .expect_get_stats()
            .once()
            .withf(|_, month, year| *month == -1 && *year == 0)
            .return_once(|_, _, _| Ok(make_stats()));

        let mut res = TestClient::get("http://example.com/dashboard/stats?monthOffset=-1")
            .send(&make_service(TEST_ADMIN, dashboard))
            .await;

        let body: DashboardStatsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.month, "2024-03-01");
        assert_eq!(body.overview.occupancy_rate, "37.5");
        assert_eq!(body.monthly.buckets.len(), 2);
        assert_eq!(body.yearly.totals.income, "2500");
        assert_eq!(body.yearly.totals.check_ins, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_stats_bad_offset_returns_400() -> TestResult {
        let mut dashboard = MockDashboardService::new();

        dashboard.expect_get_stats().never();

        let res = TestClient::get("http://example.com/dashboard/stats?yearOffset=soon")
            .send(&make_service(TEST_ADMIN, dashboard))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_stats_window_out_of_range_returns_400() -> TestResult {
        let mut dashboard = MockDashboardService::new();

        dashboard.expect_get_stats().once().return_once(|_, _, _| {
            Err(DashboardServiceError::InvalidWindow(
                DashboardError::WindowOutOfRange,
            ))
        });

        let res = TestClient::get("http://example.com/dashboard/stats?yearOffset=100000")
            .send(&make_service(TEST_ADMIN, dashboard))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_stats_as_tenant_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com/dashboard/stats")
            .send(&make_service(TEST_TENANT, MockDashboardService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
