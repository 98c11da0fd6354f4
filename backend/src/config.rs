//! # Configuration
//!
//! Everything the roster service needs to reach its collaborators is read from
//! environment variables once, at start-up. Optional keys fall back to a
//! default (logged at `info`), required keys fail with `OrderError::Config`.

use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::{info, warn};

use crate::error::{OrderError, OrderResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the Google spreadsheet holding one tab per month.
    pub spreadsheet_id: String,
    pub sheets_api_base: String,
    /// Template image every roster page is drawn on.
    pub base_image_url: String,
    pub github_api_base: String,
    pub github_owner: String,
    pub github_repo: String,
    pub github_branch: String,
    pub github_token: String,
    /// Folder of the asset repository roster pages are uploaded to.
    pub image_folder: String,
    pub redis_url: String,
    pub users_db_path: String,
    pub fonts_dir: String,
    pub font_family: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> OrderResult<Self> {
        Ok(Self {
            spreadsheet_id: required("SPREADSHEET_ID")?,
            sheets_api_base: try_load("SHEETS_API_BASE", "https://sheets.googleapis.com")?,
            base_image_url: required("BASE_IMAGE_URL")?,
            github_api_base: try_load("GITHUB_API_BASE", "https://api.github.com")?,
            github_owner: required("GITHUB_OWNER")?,
            github_repo: required("GITHUB_REPO")?,
            github_branch: try_load("GITHUB_BRANCH", "main")?,
            github_token: required("GITHUB_TOKEN")?,
            image_folder: try_load("IMAGE_FOLDER", "list")?,
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379")?,
            users_db_path: try_load("USERS_DB_PATH", "order_lunch.sqlite")?,
            fonts_dir: try_load("FONTS_DIR", "./fonts")?,
            font_family: try_load("FONT_FAMILY", "Arial")?,
            http_timeout: Duration::from_secs(try_load("HTTP_TIMEOUT_SECS", "30")?),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &str) -> OrderResult<String> {
    var(key).ok_or_else(|| {
        warn!("Environment variable {key} not found");
        OrderError::Config {
            key: key.to_string(),
            reason: "missing".to_string(),
        }
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> OrderResult<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            OrderError::Config {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_load_falls_back_to_default() {
        let timeout: u64 = try_load("ROSTER_TEST_UNSET_TIMEOUT", "30").unwrap();
        assert_eq!(timeout, 30);
    }

    #[test]
    fn try_load_rejects_unparsable_default() {
        let err = try_load::<u64>("ROSTER_TEST_UNSET_NUMBER", "soon").unwrap_err();
        assert!(matches!(err, OrderError::Config { ref key, .. } if key == "ROSTER_TEST_UNSET_NUMBER"));
    }

    #[test]
    fn required_reports_missing_key() {
        let err = required("ROSTER_TEST_UNSET_REQUIRED").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration for ROSTER_TEST_UNSET_REQUIRED: missing"
        );
    }
}
