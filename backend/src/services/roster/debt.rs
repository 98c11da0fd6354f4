use common::model::roster::DebtMap;

use crate::error::{OrderError, OrderResult};
use crate::services::sheets::Grid;

/// Grid column holding the payment mark of the previous period.
const PAID_COLUMN: usize = 1;
/// Grid column holding the outstanding balance.
const BALANCE_COLUMN: usize = 2;

const PAID_MARK: &str = "v";
const ZERO_BALANCE: &str = "0";

/// A user owes money when they are not marked paid and their balance is not
/// exactly `0`.
pub fn is_unpaid(paid: &str, balance: &str) -> bool {
    !paid.eq_ignore_ascii_case(PAID_MARK) && balance != ZERO_BALANCE
}

/// Builds the row → name map of users who left the previous period unpaid.
pub fn compute_unpaid(previous: &Grid) -> OrderResult<DebtMap> {
    if previous.column_count() <= BALANCE_COLUMN {
        return Err(OrderError::DebtComputationFailed(format!(
            "expected at least {} columns, found {}",
            BALANCE_COLUMN + 1,
            previous.column_count()
        )));
    }

    Ok((0..previous.column(PAID_COLUMN).len())
        .filter(|&row| {
            is_unpaid(
                previous.cell(PAID_COLUMN, row),
                previous.cell(BALANCE_COLUMN, row),
            )
        })
        .map(|row| (row, previous.name_at(row).to_string()))
        .collect())
}
