//! # Spreadsheet access
//!
//! The lunch roster lives in one Google spreadsheet with a tab per month,
//! titled `T{month}/{year}`. This module defines the `SpreadsheetService`
//! seam used by the rest of the backend, the typed `Grid` the tabs are parsed
//! into, and the two lookups every operation starts with:
//!
//! - `find_period_sheet`: resolves the tab of the month containing a date.
//! - `load_grid`: fetches that tab column-major, skipping the first sheet
//!   column (row numbers), so grid column `i` is sheet column `i + 1`.

pub mod google;
pub mod grid;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
pub use grid::Grid;

/// First sheet column fetched into a `Grid`.
pub const FIRST_GRID_COLUMN: usize = 1;

/// Title and id of one tab of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// A rectangular write into one tab. Indices are zero-based sheet indices,
/// end bounds exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUpdate {
    pub sheet_id: i64,
    pub start_column: usize,
    pub end_column: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub values: Vec<Vec<String>>,
}

#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Lists every tab of the configured spreadsheet.
    async fn list_sheets(&self) -> OrderResult<Vec<SheetProperties>>;

    /// Reads a tab column-major, starting at `start_column`.
    async fn batch_get(&self, sheet_id: i64, start_column: usize) -> OrderResult<Vec<Vec<String>>>;

    /// Writes `update` as raw values. Returns whether the service accepted it.
    async fn batch_update(&self, update: &RangeUpdate) -> OrderResult<bool>;
}

/// Title of the tab holding the month of `date`, e.g. `T3/2024`.
pub fn sheet_title(date: NaiveDate) -> String {
    format!("T{}/{}", date.month(), date.year())
}

/// Resolves the id of the tab holding the month of `date`.
///
/// # Arguments
/// * `service` - The spreadsheet to search.
/// * `date` - Any day of the wanted period.
///
/// # Returns
/// The `sheet_id` of the tab titled [`sheet_title`], or
/// `OrderError::SheetNotFound` when no tab has that exact title.
pub async fn find_period_sheet(
    service: &dyn SpreadsheetService,
    date: NaiveDate,
) -> OrderResult<i64> {
    let title = sheet_title(date);
    let sheets = service.list_sheets().await?;
    sheets
        .into_iter()
        .find(|sheet| sheet.title == title)
        .map(|sheet| {
            debug!("Resolved {} to sheet {}", title, sheet.sheet_id);
            sheet.sheet_id
        })
        .ok_or(OrderError::SheetNotFound { title })
}

/// Reads a whole period tab, column-major, starting at the first grid column.
///
/// # Arguments
/// * `service` - The spreadsheet to read from.
/// * `sheet_id` - Tab id, usually from [`find_period_sheet`].
///
/// # Returns
/// The tab as a [`Grid`]. A tab with no values is an empty grid.
pub async fn load_grid(service: &dyn SpreadsheetService, sheet_id: i64) -> OrderResult<Grid> {
    let columns = service.batch_get(sheet_id, FIRST_GRID_COLUMN).await?;
    Ok(Grid::new(columns))
}
