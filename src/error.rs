use thiserror::Error;

/// Errors surfaced by [`crate::UserStore`] and [`crate::password`].
///
/// A missing user and a failed password check are not errors; they come back
/// as `None` and `false`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or a statement failed.
    #[error("user store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// The password cannot be hashed without bcrypt truncating it.
    #[error("password rejected: {0}")]
    PasswordRejected(&'static str),
}

pub type Result<T> = std::result::Result<T, StoreError>;
