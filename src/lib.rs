//! SQLite-backed user records and password authentication.
//!
//! # Intention
//!
//! - Provide direct, parameterized access to a single `users` table.
//! - Verify passwords only through bcrypt's own verification routine.
//!
//! # Architectural Boundaries
//!
//! - Every operation opens its own connection and releases it before returning.
//! - No pooling, caching, sessions or roles.
//! - Rows are created outside this crate; see [`UserStore::initialize_schema`]
//!   for the table layout.

pub mod config;
pub mod error;
pub mod models;
pub mod password;
pub mod sqlite;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use models::{User, UserSummary};
pub use sqlite::UserStore;
