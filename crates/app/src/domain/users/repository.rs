//! Users Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use dormitory::users::{UserRole, UserUuid};

use crate::domain::users::models::{NewUser, PendingRegistration, User, UserCredentials};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const USER_EXISTS_SQL: &str = include_str!("sql/user_exists.sql");
const UPSERT_REGISTRATION_SQL: &str = include_str!("sql/upsert_registration.sql");
const LOCK_REGISTRATION_SQL: &str = include_str!("sql/lock_registration.sql");
const DELETE_REGISTRATION_SQL: &str = include_str!("sql/delete_registration.sql");
const DELETE_EXPIRED_REGISTRATIONS_SQL: &str =
    include_str!("sql/delete_expired_registrations.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn user_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(USER_EXISTS_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn upsert_registration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        registration: &PendingRegistration,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_REGISTRATION_SQL)
            .bind(uuid::Uuid::now_v7())
            .bind(&registration.name)
            .bind(&registration.email)
            .bind(&registration.password_hash)
            .bind(&registration.code_hash)
            .bind(SqlxTimestamp::from(registration.expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn lock_registration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<PendingRegistration>, sqlx::Error> {
        query_as::<Postgres, PendingRegistration>(LOCK_REGISTRATION_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_registration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REGISTRATION_SQL)
            .bind(email)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_expired_registrations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_EXPIRED_REGISTRATIONS_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role
            .parse::<UserRole>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            user: User {
                uuid: UserUuid::from_uuid(row.try_get("uuid")?),
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                role,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PendingRegistration {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            code_hash: row.try_get("code_hash")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
        })
    }
}
