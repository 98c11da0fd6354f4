use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Status label shown next to a registrant who still owes money from the
/// previous period.
pub const UNPAID_LABEL: &str = "Nợ";

/// Users still owing money from the previous period, keyed by their row in
/// the period sheet.
pub type DebtMap = BTreeMap<usize, String>;

/// One line of the daily roster: who registered and whether they are in debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    pub display_name: String,
    /// Either empty or [`UNPAID_LABEL`].
    pub status_label: String,
}

impl RegistrationEntry {
    pub fn new(display_name: impl Into<String>, status_label: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            status_label: status_label.into(),
        }
    }

    pub fn is_unpaid(&self) -> bool {
        self.status_label == UNPAID_LABEL
    }
}

/// A published roster page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPage {
    /// Download URL returned by the asset store.
    pub url: String,
    /// Human readable label, `Page 1`, `Page 2`, ...
    pub label: String,
}

/// Result of building today's roster.
///
/// `floor16_pick` and `floor19_pick` name the registrant randomly chosen on
/// each floor to collect the lunch tickets; they are empty when nobody on
/// that floor can be picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderListImage {
    pub pages: Vec<RosterPage>,
    pub floor16_pick: String,
    pub floor19_pick: String,
}
