//! Auth Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dormitory_app::auth::{IssuedToken, User};

pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod verify;

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Lower-cased email address
    pub email: String,

    /// `admin` or `tenant`
    pub role: String,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,

    /// The authenticated user
    pub user: UserResponse,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            user: issued.user.into(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use dormitory::users::{UserRole, UserUuid};
    use dormitory_app::auth::User;

    pub(crate) fn make_user(uuid: UserUuid, role: UserRole) -> User {
        User {
            uuid,
            name: "Ada Tenant".to_string(),
            email: "ada@example.com".to_string(),
            role,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
