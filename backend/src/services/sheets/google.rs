use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RangeUpdate, SheetProperties, SpreadsheetService};
use crate::error::{OrderError, OrderResult};
use crate::services::cache::TokenCache;

/// Google Sheets v4 client bound to one spreadsheet.
///
/// Every call reads the bearer token from the token cache; refreshing it is
/// somebody else's job.
pub struct GoogleSheetsClient {
    http: Client,
    api_base: String,
    spreadsheet_id: String,
    tokens: Arc<dyn TokenCache>,
}

#[derive(Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct GridRange {
    sheet_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_column_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_column_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_row_index: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataFilter {
    grid_range: GridRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetRequest {
    data_filters: Vec<DataFilter>,
    major_dimension: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<MatchedValueRange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedValueRange {
    value_range: ValueRange,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateRequest {
    value_input_option: &'static str,
    data: Vec<DataFilterValueRange>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataFilterValueRange {
    data_filter: DataFilter,
    values: Vec<Vec<String>>,
}

impl GoogleSheetsClient {
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        tokens: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            tokens,
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/v4/spreadsheets/{}{}", self.api_base, self.spreadsheet_id, suffix)
    }

    async fn bearer(&self) -> OrderResult<String> {
        self.tokens.read().await?.ok_or(OrderError::TokenUnavailable)
    }
}

fn batch_get_request(sheet_id: i64, start_column: usize) -> BatchGetRequest {
    BatchGetRequest {
        data_filters: vec![DataFilter {
            grid_range: GridRange {
                sheet_id,
                start_column_index: Some(start_column),
                end_column_index: None,
                start_row_index: None,
                end_row_index: None,
            },
        }],
        major_dimension: "COLUMNS",
    }
}

fn batch_update_request(update: &RangeUpdate) -> BatchUpdateRequest {
    BatchUpdateRequest {
        value_input_option: "RAW",
        data: vec![DataFilterValueRange {
            data_filter: DataFilter {
                grid_range: GridRange {
                    sheet_id: update.sheet_id,
                    start_column_index: Some(update.start_column),
                    end_column_index: Some(update.end_column),
                    start_row_index: Some(update.start_row),
                    end_row_index: Some(update.end_row),
                },
            },
            values: update.values.clone(),
        }],
    }
}

/// Extracts `valueRanges[0].valueRange.values`.
fn into_columns(response: BatchGetResponse) -> OrderResult<Vec<Vec<String>>> {
    response
        .value_ranges
        .into_iter()
        .next()
        .map(|range| range.value_range.values)
        .ok_or_else(|| OrderError::MalformedResponse("no value range returned".to_string()))
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsClient {
    async fn list_sheets(&self) -> OrderResult<Vec<SheetProperties>> {
        let token = self.bearer().await?;
        let response: SpreadsheetResponse = self
            .http
            .get(self.url(""))
            .query(&[("fields", "sheets.properties(sheetId,title)")])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn batch_get(&self, sheet_id: i64, start_column: usize) -> OrderResult<Vec<Vec<String>>> {
        let token = self.bearer().await?;
        let body = self
            .http
            .post(self.url("/values:batchGetByDataFilter"))
            .bearer_auth(token)
            .json(&batch_get_request(sheet_id, start_column))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let response: BatchGetResponse = serde_json::from_slice(&body)?;
        let columns = into_columns(response)?;
        debug!("Fetched {} columns from sheet {}", columns.len(), sheet_id);
        Ok(columns)
    }

    async fn batch_update(&self, update: &RangeUpdate) -> OrderResult<bool> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(self.url("/values:batchUpdateByDataFilter"))
            .bearer_auth(token)
            .json(&batch_update_request(update))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Sheet {} rejected update: {}", update.sheet_id, status);
        }
        Ok(status.is_success())
    }
}
