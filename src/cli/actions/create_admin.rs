use crate::api::handlers::auth::{normalize_email, password::hash_password, valid_email};
use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Handle the create-admin action: bootstrap or rotate the administrator
/// account. The account is created verified so it can log in immediately.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::CreateAdmin {
            dsn,
            name,
            email,
            password,
        } => {
            let email = normalize_email(&email);
            if !valid_email(&email) {
                return Err(anyhow!("invalid administrator email: {email}"));
            }

            let password_hash = hash_password(password.expose_secret())?;

            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(&dsn)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            let query = r"
                INSERT INTO accounts (name, email, password_hash, role, is_verified)
                VALUES ($1, $2, $3, 'admin', TRUE)
                ON CONFLICT (email) DO UPDATE
                SET name = EXCLUDED.name,
                    password_hash = EXCLUDED.password_hash,
                    role = 'admin',
                    is_verified = TRUE,
                    updated_at = NOW()
            ";
            sqlx::query(query)
                .bind(&name)
                .bind(&email)
                .bind(&password_hash)
                .execute(&pool)
                .await
                .context("Failed to upsert administrator account")?;

            info!("Administrator account ready: {email}");
            println!("Administrator account ready: {email}");

            Ok(())
        }
        Action::Server { .. } => Err(anyhow!("not a create-admin action")),
    }
}
