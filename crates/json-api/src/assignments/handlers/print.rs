//! Print Transactions Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::prelude::*;

use dormitory::dashboard::DateFilter;

use crate::{
    assignments::{
        errors::into_status_error,
        models::{PrintTransactionResponse, PrintTransactionsResponse},
    },
    extensions::*,
    state::State,
};

fn parse_bound(req: &Request, name: &str) -> Result<Option<Date>, StatusError> {
    req.query::<String>(name)
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<Date>())
        .transpose()
        .or_400(&format!("Invalid \"{name}\", expected YYYY-MM-DD"))
}

/// Print Transactions Handler
///
/// Billable stays (approved, active or completed) overlapping the optional
/// `startDate`/`endDate` window, most recent first.
#[endpoint(
    tags("assignments"),
    summary = "Print Transactions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Transactions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid date range"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<PrintTransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let start = parse_bound(req, "startDate")?;
    let end = parse_bound(req, "endDate")?;

    let filter = DateFilter::new(start, end).or_400("Invalid date range")?;

    let transactions = state
        .app
        .assignments
        .list_print_transactions(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PrintTransactionsResponse {
        transactions: transactions
            .into_iter()
            .map(PrintTransactionResponse::from)
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use dormitory::assignments::AssignmentStatus;
    use dormitory_app::assignments::{MockAssignmentsService, models::PrintTransaction};

    use crate::test_helpers::{TEST_ADMIN, TEST_TENANT, TestServices, service_as};

    use super::*;

    fn make_service(assignments: MockAssignmentsService) -> Service {
        service_as(
            TEST_ADMIN,
            TestServices::new().with_assignments(assignments),
            Router::with_path("assignments/print/transactions").get(handler),
        )
    }

    fn transaction() -> PrintTransaction {
        PrintTransaction {
            reference: "REF-01032024-AB12CD".to_string(),
            tenant_name: "Ada Tenant".to_string(),
            tenant_email: "ada@example.com".to_string(),
            room_number: "A101".to_string(),
            status: AssignmentStatus::Completed,
            check_in: date(2024, 3, 1),
            check_out: date(2024, 3, 31),
            duration_days: 30,
            total_price: Some(Decimal::new(6_000, 0)),
        }
    }

    #[tokio::test]
    async fn test_print_transactions_with_window() -> TestResult {
        let expected = DateFilter::new(Some(date(2024, 3, 1)), Some(date(2024, 3, 31)))?;
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_list_print_transactions()
            .once()
            .withf(move |filter| *filter == expected)
            .return_once(|_| Ok(vec![transaction()]));

        let mut res = TestClient::get(
            "http://example.com/assignments/print/transactions?startDate=2024-03-01&endDate=2024-03-31",
        )
        .send(&make_service(assignments))
        .await;

        let body: PrintTransactionsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.transactions.len(), 1);
        assert_eq!(body.transactions[0].check_in, "2024-03-01");
        assert_eq!(body.transactions[0].total_price.as_deref(), Some("6000"));

        Ok(())
    }

    #[tokio::test]
    async fn test_print_transactions_without_window() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments
            .expect_list_print_transactions()
            .once()
            .withf(|filter| *filter == DateFilter::default())
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/assignments/print/transactions")
            .send(&make_service(assignments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_print_transactions_inverted_window_returns_400() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_list_print_transactions().never();

        let res = TestClient::get(
            "http://example.com/assignments/print/transactions?startDate=2024-03-31&endDate=2024-03-01",
        )
        .send(&make_service(assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_print_transactions_bad_date_returns_400() -> TestResult {
        let mut assignments = MockAssignmentsService::new();

        assignments.expect_list_print_transactions().never();

        let res = TestClient::get(
            "http://example.com/assignments/print/transactions?startDate=March",
        )
        .send(&make_service(assignments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_print_transactions_as_tenant_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com/assignments/print/transactions")
            .send(&service_as(
                TEST_TENANT,
                TestServices::new(),
                Router::with_path("assignments/print/transactions").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
