//! Dashboard Errors

use salvo::http::StatusError;

use dormitory_app::dashboard::DashboardServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: DashboardServiceError) -> StatusError {
    match error {
        DashboardServiceError::InvalidWindow(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        DashboardServiceError::Sql(source) => internal_error("failed to build dashboard", &source),
    }
}
