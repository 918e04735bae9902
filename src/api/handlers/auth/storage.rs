//! Account persistence queries.
//!
//! Every query runs inside a `db.query` span so slow statements show up in
//! traces with the statement name attached.

use sqlx::{PgPool, Row};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use super::types::Role;

/// Account columns needed by the signup and login flows.
#[derive(Debug)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub email_otp: Option<String>,
    pub email_otp_expires_at: Option<i64>,
    pub profile_pic: String,
}

/// Result of a signup request against the accounts table.
#[derive(Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    /// No account existed for the email; a fresh unverified row was inserted.
    Created,
    /// An unverified account existed; its name, password and challenge were
    /// replaced in place.
    Refreshed,
    /// The email belongs to a verified account; nothing was written.
    AlreadyVerified,
}

pub async fn find_account(pool: &PgPool, email: &str) -> Result<Option<AccountRow>, sqlx::Error> {
    let row = sqlx::query(
        r"
        SELECT id, name, email, password_hash, role, is_verified,
               email_otp, email_otp_expires_at, profile_pic
        FROM accounts
        WHERE email = $1
        ",
    )
    .bind(email)
    .fetch_optional(pool)
    .instrument(info_span!("db.query", query = "find_account"))
    .await?;

    Ok(row.map(|row| account_from_row(&row)))
}

fn account_from_row(row: &sqlx::postgres::PgRow) -> AccountRow {
    let role: String = row.get("role");
    AccountRow {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::parse(&role).unwrap_or(Role::User),
        is_verified: row.get("is_verified"),
        email_otp: row.get("email_otp"),
        email_otp_expires_at: row.get("email_otp_expires_at"),
        profile_pic: row.get("profile_pic"),
    }
}

/// Create or refresh an unverified account for a signup request.
///
/// A concurrent insert for the same email can slip between the lookup and
/// the INSERT; the unique violation falls back to the refresh path so the
/// caller never sees the race.
pub async fn upsert_unverified(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    otp: &str,
    otp_expires_at: i64,
) -> Result<SignupOutcome, sqlx::Error> {
    if let Some(existing) = find_account(pool, email).await? {
        if existing.is_verified {
            return Ok(SignupOutcome::AlreadyVerified);
        }
        refresh_unverified(pool, email, name, password_hash, otp, otp_expires_at).await?;
        return Ok(SignupOutcome::Refreshed);
    }

    let inserted = sqlx::query(
        r"
        INSERT INTO accounts (name, email, password_hash, email_otp, email_otp_expires_at)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(otp)
    .bind(otp_expires_at)
    .execute(pool)
    .instrument(info_span!("db.query", query = "insert_unverified"))
    .await;

    match inserted {
        Ok(_) => Ok(SignupOutcome::Created),
        Err(err) if is_unique_violation(&err) => {
            if let Some(existing) = find_account(pool, email).await? {
                if existing.is_verified {
                    return Ok(SignupOutcome::AlreadyVerified);
                }
            }
            refresh_unverified(pool, email, name, password_hash, otp, otp_expires_at).await?;
            Ok(SignupOutcome::Refreshed)
        }
        Err(err) => Err(err),
    }
}

async fn refresh_unverified(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
    otp: &str,
    otp_expires_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE accounts
        SET name = $2,
            password_hash = $3,
            email_otp = $4,
            email_otp_expires_at = $5,
            updated_at = now()
        WHERE email = $1 AND is_verified = FALSE
        ",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(otp)
    .bind(otp_expires_at)
    .execute(pool)
    .instrument(info_span!("db.query", query = "refresh_unverified"))
    .await?;

    Ok(())
}

/// Promote an account to verified and discard its signup challenge.
pub async fn mark_verified(pool: &PgPool, account_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE accounts
        SET is_verified = TRUE,
            email_otp = NULL,
            email_otp_expires_at = NULL,
            updated_at = now()
        WHERE id = $1
        ",
    )
    .bind(account_id)
    .execute(pool)
    .instrument(info_span!("db.query", query = "mark_verified"))
    .await?;

    Ok(())
}

/// Attach a hashed reset token to the account; returns false when no account
/// matches the email.
pub async fn set_reset_token(
    pool: &PgPool,
    email: &str,
    token_hash: &[u8],
    expires_at: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r"
        UPDATE accounts
        SET reset_token_hash = $2,
            reset_expires_at = $3,
            updated_at = now()
        WHERE email = $1
        RETURNING id
        ",
    )
    .bind(email)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_optional(pool)
    .instrument(info_span!("db.query", query = "set_reset_token"))
    .await?;

    Ok(row.is_some())
}

/// Atomically redeem a reset token: the password is replaced and the token
/// cleared in one statement, so a token can never be used twice. Returns
/// false when the token is unknown or already expired.
pub async fn consume_reset_token(
    pool: &PgPool,
    token_hash: &[u8],
    password_hash: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        r"
        UPDATE accounts
        SET password_hash = $2,
            reset_token_hash = NULL,
            reset_expires_at = NULL,
            updated_at = now()
        WHERE reset_token_hash = $1 AND reset_expires_at > $3
        RETURNING id
        ",
    )
    .bind(token_hash)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .instrument(info_span!("db.query", query = "consume_reset_token"))
    .await?;

    Ok(row.is_some())
}

/// Profile columns exposed through the session endpoints.
#[derive(Debug)]
pub struct ProfileRow {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_pic: String,
}

pub async fn fetch_profile(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    let row = sqlx::query(
        r"
        SELECT name, email, role, profile_pic
        FROM accounts
        WHERE id = $1
        ",
    )
    .bind(account_id)
    .fetch_optional(pool)
    .instrument(info_span!("db.query", query = "fetch_profile"))
    .await?;

    Ok(row.map(|row| {
        let role: String = row.get("role");
        ProfileRow {
            name: row.get("name"),
            email: row.get("email"),
            role: Role::parse(&role).unwrap_or(Role::User),
            profile_pic: row.get("profile_pic"),
        }
    }))
}

pub async fn fetch_password_hash(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT password_hash FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .instrument(info_span!("db.query", query = "fetch_password_hash"))
        .await?;

    Ok(row.map(|row| row.get("password_hash")))
}

/// Apply partial profile updates; untouched columns keep their value.
pub async fn update_profile(
    pool: &PgPool,
    account_id: Uuid,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE accounts
        SET name = COALESCE($2, name),
            password_hash = COALESCE($3, password_hash),
            updated_at = now()
        WHERE id = $1
        ",
    )
    .bind(account_id)
    .bind(name)
    .bind(password_hash)
    .execute(pool)
    .instrument(info_span!("db.query", query = "update_profile"))
    .await?;

    Ok(())
}

pub async fn set_profile_pic(
    pool: &PgPool,
    account_id: Uuid,
    path: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        UPDATE accounts
        SET profile_pic = $2,
            updated_at = now()
        WHERE id = $1
        ",
    )
    .bind(account_id)
    .bind(path)
    .execute(pool)
    .instrument(info_span!("db.query", query = "set_profile_pic"))
    .await?;

    Ok(())
}

/// Postgres unique_violation, SQLSTATE 23505.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_matches_only_23505() {
        let not_db = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&not_db));
    }
}
