use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Email already exists")]
    Conflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    NotFound,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Notification dispatch error: {0}")]
    Dispatch(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    WeakPassword,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No session token provided")]
    Missing,

    #[error("Session expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),
}

impl Error {
    /// Whether the error came from infrastructure rather than the caller.
    ///
    /// Infrastructure errors are logged in full server-side and reported to
    /// clients with a generic message only.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Error::Hashing(_) | Error::Dispatch(_) | Error::Storage(_)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::Session(_))
    }
}
