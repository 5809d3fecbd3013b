//! Account repository

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{error::AppResult, models::Account};

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

/// Repository for login accounts
pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account
    pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO accounts (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Find account by login email (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"SELECT id, email, password_hash FROM accounts WHERE lower(email) = lower($1)"#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Account::from))
    }

    /// Delete an account; profile and evaluations follow through foreign keys
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM accounts WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
