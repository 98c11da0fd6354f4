use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AssetStore;
use crate::error::{OrderError, OrderResult};

const USER_AGENT: &str = "lunch-roster";

/// Stores images as files of a GitHub repository through the contents API.
pub struct GithubAssetStore {
    http: Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateFileRequest<'a> {
    message: String,
    content: &'a str,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateFileResponse {
    content: FileContent,
}

#[derive(Debug, Deserialize)]
struct FileContent {
    download_url: Option<String>,
}

impl GithubAssetStore {
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            token: token.into(),
        }
    }

    fn file_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }
}

fn download_url(response: CreateFileResponse) -> OrderResult<String> {
    response
        .content
        .download_url
        .ok_or_else(|| OrderError::MalformedResponse("upload returned no download_url".to_string()))
}

#[async_trait]
impl AssetStore for GithubAssetStore {
    async fn upload(&self, base64_png: &str, folder: &str) -> OrderResult<String> {
        let path = format!("{}/{}.png", folder.trim_matches('/'), Uuid::new_v4());
        let body = CreateFileRequest {
            message: format!("Upload {path}"),
            content: base64_png,
            branch: &self.branch,
        };
        let response: CreateFileResponse = self
            .http
            .put(self.file_url(&path))
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let url = download_url(response)?;
        info!("Uploaded {path}");
        Ok(url)
    }
}
