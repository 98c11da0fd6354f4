use serde::{Deserialize, Serialize};

/// A member of the lunch group as listed in the user directory.
///
/// `full_name` is the name written in the first column of every period sheet,
/// `user_name` is the handle used when placing orders. Blacklisted users still
/// show up on the roster but are never picked to collect the tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub full_name: String,
    pub user_name: String,
    pub is_blacklisted: bool,
}
