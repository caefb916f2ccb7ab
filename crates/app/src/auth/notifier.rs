//! Delivery of verification codes.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
#[error("failed to deliver verification code: {0}")]
pub struct NotifierError(pub String);

/// Sends verification codes to people signing up.
#[automock]
#[async_trait]
pub trait VerificationNotifier: Send + Sync {
    async fn send_code(&self, email: &str, name: &str, code: &str) -> Result<(), NotifierError>;
}

/// Writes codes to the log instead of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl VerificationNotifier for LogNotifier {
    async fn send_code(&self, email: &str, name: &str, code: &str) -> Result<(), NotifierError> {
        info!(email, name, code, "verification code issued");

        Ok(())
    }
}
