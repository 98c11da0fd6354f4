use common::model::roster::{DebtMap, RegistrationEntry, UNPAID_LABEL};
use log::warn;
use rand::Rng;

use crate::services::sheets::Grid;

const REGISTRATION_MARK: &str = "x";
const FLOOR_19_TAG: &str = "19";

/// Today's registrants plus the two groups tickets are picked from.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Registrations {
    /// Roster lines in sheet order.
    pub entries: Vec<RegistrationEntry>,
    pub floor16: Vec<String>,
    pub floor19: Vec<String>,
}

impl Registrations {
    fn register(&mut self, name: &str, status_label: &str) {
        match self.entries.iter_mut().find(|e| e.display_name == name) {
            Some(entry) => entry.status_label = status_label.to_string(),
            None => self
                .entries
                .push(RegistrationEntry::new(name, status_label)),
        }
    }

    /// Adds `name` to its floor group once.
    fn classify(&mut self, name: &str) {
        let group = if name.contains(FLOOR_19_TAG) {
            &mut self.floor19
        } else {
            &mut self.floor16
        };
        if !group.iter().any(|n| n == name) {
            group.push(name.to_string());
        }
    }
}

/// Whether `name` contains one of the blacklisted full names, ignoring case.
pub fn is_blacklisted(name: &str, blacklist: &[String]) -> bool {
    let name = name.to_lowercase();
    blacklist
        .iter()
        .map(|full_name| full_name.trim())
        .filter(|full_name| !full_name.is_empty())
        .any(|full_name| name.contains(&full_name.to_lowercase()))
}

/// Collects everyone marked `x` in `date_column`.
///
/// Blacklisted users stay on the roster but never join a floor group.
/// Users found in `debts` are labelled unpaid. Marked rows without a name
/// are skipped.
pub fn collect(
    grid: &Grid,
    date_column: usize,
    debts: &DebtMap,
    blacklist: &[String],
) -> Registrations {
    let mut registrations = Registrations::default();

    for (row, mark) in grid.column(date_column).iter().enumerate() {
        if !mark.trim().eq_ignore_ascii_case(REGISTRATION_MARK) {
            continue;
        }
        let name = grid.name_at(row).trim();
        if name.is_empty() {
            warn!("Row {row} is marked but has no name, skipping");
            continue;
        }
        if !is_blacklisted(name, blacklist) {
            registrations.classify(name);
        }
        let status = if debts.contains_key(&row) {
            UNPAID_LABEL
        } else {
            ""
        };
        registrations.register(name, status);
    }

    registrations
}

/// Picks one member of `group` uniformly at random, or an empty string.
pub fn pick<R: Rng + ?Sized>(group: &[String], rng: &mut R) -> String {
    if group.is_empty() {
        return String::new();
    }
    group[rng.random_range(0..group.len())].clone()
}
