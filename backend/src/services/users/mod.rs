//! Read-only view of the lunch group's members.

pub mod sqlite;

use common::model::user::User;

use crate::error::{OrderError, OrderResult};

pub trait UserDirectory: Send + Sync {
    fn users(&self) -> OrderResult<Vec<User>>;

    fn find_by_user_name(&self, user_name: &str) -> OrderResult<User> {
        self.users()?
            .into_iter()
            .find(|u| u.user_name == user_name)
            .ok_or_else(|| OrderError::UserNotFound {
                user: user_name.to_string(),
            })
    }

    /// Full names of the users excluded from the ticket pick.
    fn blacklisted_names(&self) -> OrderResult<Vec<String>> {
        Ok(self
            .users()?
            .into_iter()
            .filter(|u| u.is_blacklisted)
            .map(|u| u.full_name)
            .collect())
    }
}
