use async_trait::async_trait;
use image::RgbaImage;
use log::debug;
use reqwest::Client;

use crate::error::OrderResult;

/// Supplies the blank roster template pages are drawn on.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self) -> OrderResult<RgbaImage>;
}

/// Template downloaded from a URL on every use.
pub struct HttpTemplate {
    http: Client,
    url: String,
}

impl HttpTemplate {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TemplateSource for HttpTemplate {
    async fn fetch(&self) -> OrderResult<RgbaImage> {
        let bytes = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!("Downloaded roster template ({} bytes)", bytes.len());
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}
