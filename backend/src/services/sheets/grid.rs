//! Typed view over a period sheet.
//!
//! The remote service hands the sheet back column-major: every inner vector is
//! one sheet column. Position 0 of each column is its header (a label, or the
//! day's date for order columns), the following positions are one per user.
//! Column 0 holds the user display names.

use chrono::NaiveDate;

/// `dd/MM/yyyy`, the format date headers are matched against.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(columns: Vec<Vec<String>>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cells of column `col`, empty when the column does not exist.
    pub fn column(&self, col: usize) -> &[String] {
        self.columns.get(col).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The remote service trims trailing empty cells, so a missing cell reads
    /// as the empty string.
    pub fn cell(&self, col: usize, row: usize) -> &str {
        self.column(col).get(row).map(String::as_str).unwrap_or("")
    }

    /// Display name of the user on `row`.
    pub fn name_at(&self, row: usize) -> &str {
        self.cell(0, row)
    }

    /// Finds the column whose header is part of `date` formatted `dd/MM/yyyy`.
    ///
    /// Headers may be written as `05/03` or `05/03/2024`, hence the reversed
    /// containment check. The name column is never a date column.
    pub fn date_column(&self, date: NaiveDate) -> Option<usize> {
        let target = date.format(DATE_FORMAT).to_string();
        self.columns
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, column)| {
                column
                    .first()
                    .map(|header| header.trim())
                    .is_some_and(|header| !header.is_empty() && target.contains(header))
            })
            .map(|(index, _)| index)
    }

    /// Finds the row of the user whose name cell contains `full_name`.
    ///
    /// Row 0 is the header label and never matches.
    pub fn user_row(&self, full_name: &str) -> Option<usize> {
        let needle = full_name.trim();
        if needle.is_empty() {
            return None;
        }
        self.column(0)
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, cell)| cell.contains(needle))
            .map(|(row, _)| row)
    }
}
