use std::path::PathBuf;

use common::model::user::User;
use rusqlite::{Connection, OpenFlags};

use super::UserDirectory;
use crate::error::OrderResult;

/// User directory stored in the `users` table of a SQLite database.
///
/// The table is owned by another process; it is opened read-only and queried
/// on every call so edits show up without a restart.
pub struct SqliteUserDirectory {
    path: PathBuf,
}

impl SqliteUserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserDirectory for SqliteUserDirectory {
    fn users(&self) -> OrderResult<Vec<User>> {
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = conn.prepare("SELECT full_name, user_name, is_blacklist FROM users")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    full_name: row.get(0)?,
                    user_name: row.get(1)?,
                    is_blacklisted: row.get::<_, Option<bool>>(2)?.unwrap_or(false),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}
