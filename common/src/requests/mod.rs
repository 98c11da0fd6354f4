use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request payload for placing or cancelling a lunch order.
///
/// When `whole_month` is set, every weekday from `date` to the last day of
/// its month is toggled; otherwise only `date` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_name: String,
    pub date: NaiveDate,
    #[serde(default = "default_is_ordering")]
    pub is_ordering: bool,
    #[serde(default)]
    pub whole_month: bool,
}

fn default_is_ordering() -> bool {
    true
}
