//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::info;

use dormitory::users::{UserRole, UserUuid, check_password, normalize_email, normalize_name};

use crate::{
    auth::{
        AuthServiceError, TokenSigner, VerificationNotifier,
        codes::{generate_code, hash_code},
        password::{hash_password, verify_password},
    },
    database::Db,
    domain::users::{
        models::{AuthenticatedUser, NewUser, PendingRegistration, User},
        repository::PgUsersRepository,
    },
};

/// How long a verification code stays valid.
pub const VERIFICATION_CODE_TTL: SignedDuration = SignedDuration::from_mins(15);

/// Sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Where a verification code was sent and until when it is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub email: String,
    pub expires_at: Timestamp,
}

/// A signed bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgUsersRepository,
    signer: TokenSigner,
    notifier: Arc<dyn VerificationNotifier>,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner, notifier: Arc<dyn VerificationNotifier>) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            signer,
            notifier,
        }
    }

    /// Create an administrator account directly, skipping verification.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the email is taken or storage fails.
    pub async fn create_admin(&self, details: NewRegistration) -> Result<User, AuthServiceError> {
        let new_user = self.prepare_user(details, UserRole::Admin)?;

        let mut tx = self.db.begin().await?;

        let user = self.repository.create_user(&mut tx, &new_user).await?;

        tx.commit().await?;

        info!(user = %user.uuid, email = %user.email, "admin account created");

        Ok(user)
    }

    fn prepare_user(
        &self,
        details: NewRegistration,
        role: UserRole,
    ) -> Result<NewUser, AuthServiceError> {
        let name = normalize_name(&details.name)?;
        let email = normalize_email(&details.email)?;

        check_password(&details.password)?;

        Ok(NewUser {
            uuid: UserUuid::new(),
            name,
            email,
            password_hash: hash_password(&details.password)?,
            role,
        })
    }

    fn issue(&self, user: User, now: Timestamp) -> Result<IssuedToken, AuthServiceError> {
        let token = self.signer.issue(user.uuid, user.role, now)?;

        Ok(IssuedToken { token, user })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationReceipt, AuthServiceError> {
        let pending = self.prepare_user(registration, UserRole::Tenant)?;
        let code = generate_code();
        let expires_at = Timestamp::now()
            .checked_add(VERIFICATION_CODE_TTL)
            .map_err(|_err| AuthServiceError::InvalidCode)?;

        let mut tx = self.db.begin().await?;

        if self.repository.user_exists(&mut tx, &pending.email).await? {
            return Err(AuthServiceError::EmailTaken);
        }

        self.repository
            .upsert_registration(
                &mut tx,
                &PendingRegistration {
                    name: pending.name.clone(),
                    email: pending.email.clone(),
                    password_hash: pending.password_hash,
                    code_hash: hash_code(&code),
                    expires_at,
                },
            )
            .await?;

        self.notifier
            .send_code(&pending.email, &pending.name, &code)
            .await?;

        tx.commit().await?;

        Ok(RegistrationReceipt {
            email: pending.email,
            expires_at,
        })
    }

    async fn verify(&self, email: &str, code: &str) -> Result<IssuedToken, AuthServiceError> {
        let email = normalize_email(email).map_err(|_err| AuthServiceError::InvalidCode)?;
        let now = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let registration = self
            .repository
            .lock_registration(&mut tx, &email)
            .await?
            .filter(|registration| {
                registration.expires_at > now && registration.code_hash == hash_code(code)
            })
            .ok_or(AuthServiceError::InvalidCode)?;

        let user = self
            .repository
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: UserUuid::new(),
                    name: registration.name,
                    email: registration.email,
                    password_hash: registration.password_hash,
                    role: UserRole::Tenant,
                },
            )
            .await?;

        self.repository.delete_registration(&mut tx, &email).await?;

        tx.commit().await?;

        info!(user = %user.uuid, "tenant account verified");

        self.issue(user, now)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthServiceError> {
        let email = normalize_email(email).map_err(|_err| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_user_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.issue(credentials.user, Timestamp::now())
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let claims = self.signer.decode(bearer_token)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .get_user(&mut tx, UserUuid::from_uuid(claims.sub))
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        tx.commit().await?;

        Ok(AuthenticatedUser::from(&credentials.user))
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .get_user(&mut tx, user)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(credentials.user)
    }

    async fn sweep_expired_registrations(&self, now: Timestamp) -> Result<u64, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self
            .repository
            .delete_expired_registrations(&mut tx, now)
            .await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Start a tenant sign-up and send its verification code.
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationReceipt, AuthServiceError>;

    /// Confirm a sign-up with its code, creating the tenant account.
    async fn verify(&self, email: &str, code: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a bearer token to the current user.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, AuthServiceError>;

    /// Delete sign-ups whose codes expired at or before `now`.
    async fn sweep_expired_registrations(&self, now: Timestamp) -> Result<u64, AuthServiceError>;
}
