use chrono::{Datelike, Duration, NaiveDate, Weekday};
use common::requests::OrderRequest;

use crate::error::{OrderError, OrderResult};
use crate::services::sheets::grid::DATE_FORMAT;
use crate::services::sheets::{Grid, RangeUpdate, FIRST_GRID_COLUMN};

pub const ORDER_MARK: &str = "x";

/// Last calendar day of the month of `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One cell per day from `start`, weekends always blank.
pub fn order_values(start: NaiveDate, days: usize, is_ordering: bool) -> Vec<String> {
    let mark = if is_ordering { ORDER_MARK } else { "" };
    (0..days)
        .map(|offset| start + Duration::days(offset as i64))
        .map(|day| {
            if is_weekend(day) {
                String::new()
            } else {
                mark.to_string()
            }
        })
        .collect()
}

fn sheet_column(grid: &Grid, date: NaiveDate) -> OrderResult<usize> {
    grid.date_column(date)
        .map(|column| column + FIRST_GRID_COLUMN)
        .ok_or_else(|| OrderError::DateNotFound {
            date: date.format(DATE_FORMAT).to_string(),
        })
}

/// Computes the write toggling `request` for the user named `full_name`.
///
/// Grid columns are shifted by one to get back to sheet columns; rows are
/// the same in both.
pub fn plan_order(
    grid: &Grid,
    sheet_id: i64,
    full_name: &str,
    request: &OrderRequest,
) -> OrderResult<RangeUpdate> {
    let start_column = sheet_column(grid, request.date)?;
    let end_column = if request.whole_month {
        sheet_column(grid, last_day_of_month(request.date))? + 1
    } else {
        start_column + 1
    };
    if end_column <= start_column {
        return Err(OrderError::DateNotFound {
            date: last_day_of_month(request.date).format(DATE_FORMAT).to_string(),
        });
    }

    let row = grid
        .user_row(full_name)
        .ok_or_else(|| OrderError::UserNotFound {
            user: request.user_name.clone(),
        })?;

    Ok(RangeUpdate {
        sheet_id,
        start_column,
        end_column,
        start_row: row,
        end_row: row + 1,
        values: vec![order_values(
            request.date,
            end_column - start_column,
            request.is_ordering,
        )],
    })
}
