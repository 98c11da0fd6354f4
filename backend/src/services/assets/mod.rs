//! Image hosting for published roster pages.

pub mod github;

use async_trait::async_trait;

use crate::error::OrderResult;

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Uploads a base64-encoded PNG into `folder` and returns its download URL.
    async fn upload(&self, base64_png: &str, folder: &str) -> OrderResult<String>;
}
