//! Dashboard service errors.

use sqlx::Error;
use thiserror::Error;

use dormitory::dashboard::DashboardError;

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error(transparent)]
    InvalidWindow(#[from] DashboardError),

    #[error("storage error")]
    Sql(#[from] Error),
}
