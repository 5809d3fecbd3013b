//! Pool setup and the post-migration schema check

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::DatabaseConfig;

/// Tables the contest cannot run without
pub const CONTEST_TABLES: [&str; 3] = ["accounts", "profiles", "evaluations"];

/// Open the pool and make sure the server answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}

/// Contest tables absent from `present`
pub fn missing_tables(present: &[String]) -> Vec<&'static str> {
    CONTEST_TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|p| p == table))
        .collect()
}

/// Fail unless accounts, profiles and evaluations all exist
pub async fn verify_schema(pool: &PgPool) -> anyhow::Result<()> {
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = ANY($1)",
    )
    .bind(&CONTEST_TABLES[..])
    .fetch_all(pool)
    .await?;

    let missing = missing_tables(&present);
    if !missing.is_empty() {
        anyhow::bail!("contest tables missing after migrations: {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tables() {
        let present = vec!["profiles".to_string(), "accounts".to_string()];
        assert_eq!(missing_tables(&present), vec!["evaluations"]);

        let all: Vec<String> = CONTEST_TABLES.iter().map(|t| t.to_string()).collect();
        assert!(missing_tables(&all).is_empty());
    }
}
