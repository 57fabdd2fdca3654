use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

async fn connection(client: &redis::Client) -> Result<redis::aio::MultiplexedConnection, AppError> {
    client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
}

pub async fn get_cache<T: DeserializeOwned>(client: &redis::Client, key: &str) -> Option<T> {
    let mut conn = client.get_multiplexed_async_connection().await.ok()?;
    let value: String = conn.get(key).await.ok()?;
    serde_json::from_str(&value).ok()
}

pub async fn set_cache<T: Serialize>(
    client: &redis::Client,
    key: &str,
    value: &T,
    ttl: u64,
) -> Result<(), AppError> {
    let mut conn = connection(client).await?;
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize cache value: {}", e)))?;
    let _: () = conn.set_ex(key, json, ttl).await?;
    Ok(())
}

pub async fn delete_cache(client: &redis::Client, key: &str) -> Result<(), AppError> {
    let mut conn = connection(client).await?;
    let _: () = conn.del(key).await?;
    Ok(())
}

/// Deletes every key matching `pattern`, returning how many were removed.
pub async fn delete_pattern(client: &redis::Client, pattern: &str) -> Result<usize, AppError> {
    let mut conn = connection(client).await?;
    let keys: Vec<String> = conn.keys(pattern).await?;
    if keys.is_empty() {
        return Ok(0);
    }
    let removed: usize = conn.del(keys).await?;
    Ok(removed)
}

pub async fn health_check(client: &redis::Client) -> Result<bool, AppError> {
    let mut conn = connection(client).await?;
    let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(pong == "PONG")
}
