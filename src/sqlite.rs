use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::{User, UserSummary};
use crate::password::verify_password;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

const USERS_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY,
        username      TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        email         TEXT
    );
"#;

/// Thin façade over the `users` table.
///
/// Holds configuration only. Each operation opens its own connection, runs a
/// single parameterized statement and drops the connection before returning,
/// on the error path as well.
#[derive(Debug, Clone)]
pub struct UserStore {
    config: StoreConfig,
}

impl UserStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create the `users` table if it does not exist yet, creating the
    /// database file as needed.
    pub fn initialize_schema(&self) -> Result<()> {
        let conn = Connection::open(&self.config.db_path)?;
        conn.execute_batch(USERS_SCHEMA)?;
        debug!(path = %self.config.db_path, "users schema ready");
        Ok(())
    }

    /// Fetch the first user whose name matches exactly.
    pub fn lookup(&self, username: &str) -> Result<Option<User>> {
        let user = self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, username, password_hash, email FROM users WHERE username = ?1",
                params![username],
                user_from_row,
            )
            .optional()
        })?;
        debug!(username, found = user.is_some(), "user lookup");
        Ok(user)
    }

    /// Check a plaintext password for `username`.
    ///
    /// Unknown users, wrong passwords and unreadable stored hashes all yield
    /// `false`. Database failures still propagate.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let Some(user) = self.lookup(username)? else {
            return Ok(false);
        };
        Ok(verify_password(password, &user.password_hash))
    }

    /// Set the email of the user with `user_id`.
    ///
    /// Reports `true` whether or not such a user exists.
    pub fn update_email(&self, user_id: i64, new_email: &str) -> Result<bool> {
        let changed = self.with_tx(|conn| {
            conn.execute(
                "UPDATE users SET email = ?1 WHERE id = ?2",
                params![new_email, user_id],
            )
        })?;
        debug!(user_id, changed, "email updated");
        Ok(true)
    }

    /// Remove the user with `user_id`, if present.
    pub fn delete_user(&self, user_id: i64) -> Result<()> {
        let removed = self.with_tx(|conn| {
            conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])
        })?;
        debug!(user_id, removed, "user deleted");
        Ok(())
    }

    /// Every user, in the order SQLite returns them.
    pub fn list_all(&self) -> Result<Vec<UserSummary>> {
        let users = self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username, email FROM users")?;
            let rows = stmt.query_map([], |row| {
                Ok(UserSummary {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        // No CREATE flag: a missing database file is an error, not a new empty store.
        Connection::open_with_flags(
            &self.config.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.open()?;
        Ok(f(&conn)?)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: hash_from_column(row, 2)?,
        email: row.get(3)?,
    })
}

/// Hashes may have been written as TEXT or BLOB. Anything else becomes an
/// empty string, which never verifies.
fn hash_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        _ => String::new(),
    })
}
