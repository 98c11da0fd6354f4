use async_trait::async_trait;
use log::debug;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

use super::{effective_ttl, TokenCache};
use crate::error::OrderResult;

const ACCESS_KEY: &str = "ACCESS_KEY";

/// Token cache backed by a single Redis string key.
#[derive(Clone)]
pub struct RedisTokenCache {
    connection: ConnectionManager,
}

impl RedisTokenCache {
    pub async fn connect(redis_url: &str) -> OrderResult<Self> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn read(&self) -> OrderResult<Option<String>> {
        let mut connection = self.connection.clone();
        let token: Option<String> = connection.get(ACCESS_KEY).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    async fn write(&self, token: &str, ttl_secs: u64) -> OrderResult<bool> {
        let mut connection = self.connection.clone();
        let ttl = effective_ttl(ttl_secs);
        debug!("Caching access token for {ttl}s");
        let _: () = connection.set_ex(ACCESS_KEY, token, ttl).await?;
        Ok(true)
    }
}
