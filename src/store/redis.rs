use redis::{aio::ConnectionManager, cmd};

use crate::errors::AppError;
use crate::store::DocumentStore;

/// Redis-backed document store using the RedisJSON commands.
///
/// Documents live under one key each; the connection manager is established
/// once at startup and cloned per operation.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connect to Redis and wrap the managed connection.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn))
    }
}

impl DocumentStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        let result: Option<String> = cmd("JSON.GET").arg(key).query_async(&mut conn).await?;
        Ok(result)
    }

    async fn put(&self, key: &str, body: String) -> Result<(), AppError> {
        let mut conn = self.conn.clone();
        cmd("JSON.SET")
            .arg(key)
            .arg("$")
            .arg(body)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let removed: i64 = cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(removed > 0)
    }

    async fn list(&self, pattern: &str) -> Result<Vec<String>, AppError> {
        const SCAN_COUNT: usize = 1024;
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next_cursor, batch): (u64, Vec<String>) = cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        let mut bodies = Vec::with_capacity(keys.len());
        for key in keys {
            // A key may expire between the scan and the fetch; skip it.
            let body: Option<String> = cmd("JSON.GET").arg(&key).query_async(&mut conn).await?;
            if let Some(body) = body {
                bodies.push(body);
            }
        }
        Ok(bodies)
    }
}
