//! Redis-backed expiring keys

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::error::AppResult;

use super::CacheStore;

/// [`CacheStore`] over a Redis connection manager
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn set_flag(&self, key: &str, ttl_secs: u64) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, 1, ttl_secs.max(1)).await?;
        Ok(())
    }

    async fn has_flag(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn incr_window(&self, key: &str, window_secs: i64) -> AppResult<i64> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1).await?;

        if count == 1 {
            // First hit opens the window
            let _: () = conn.expire(key, window_secs).await?;
        }

        Ok(count)
    }
}
