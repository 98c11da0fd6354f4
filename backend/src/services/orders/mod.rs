//! Writing order marks and reading the daily menu, both against the current
//! period sheet.

pub mod menu;
pub mod write;
