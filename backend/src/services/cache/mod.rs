//! Access-token cache shared across requests.
//!
//! The Google access token is stored by whoever refreshes it and read before
//! every spreadsheet call. Reads and writes are not atomic with each other;
//! the stored lifetime is shortened by `EXPIRY_MARGIN_SECS` so a token about
//! to expire is never handed out.

pub mod redis_cache;

use async_trait::async_trait;

use crate::error::OrderResult;

/// Seconds subtracted from the advertised token lifetime.
pub const EXPIRY_MARGIN_SECS: u64 = 100;

#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Returns the cached token, `None` when absent or expired.
    async fn read(&self) -> OrderResult<Option<String>>;

    /// Stores `token` for `ttl_secs` minus the expiry margin.
    async fn write(&self, token: &str, ttl_secs: u64) -> OrderResult<bool>;
}

/// Lifetime actually stored for a token advertised as valid for `ttl_secs`.
pub fn effective_ttl(ttl_secs: u64) -> u64 {
    ttl_secs.saturating_sub(EXPIRY_MARGIN_SECS).max(1)
}
