//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use dormitory_app::auth::AuthenticatedUser;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the caller resolved by the auth middleware.
    fn insert_current_user(&mut self, user: AuthenticatedUser) -> &mut Self;

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;

    /// The caller, provided they are an admin.
    fn admin_or_403(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: AuthenticatedUser) -> &mut Self {
        self.inject(user)
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }

    fn admin_or_403(&self) -> Result<AuthenticatedUser, StatusError> {
        let user = self.current_user_or_401()?;

        if !user.is_admin() {
            return Err(StatusError::forbidden().brief("Admin access required"));
        }

        Ok(user)
    }
}
