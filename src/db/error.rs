//! Error types for database operations.

use mongodb::error::ErrorKind;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Error type for database operations
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connection or server selection errors.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query or write execution errors, including uniqueness violations.
    #[error("Query error: {0}")]
    Query(String),

    /// Requested document was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data validation failed before the database was reached.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DbError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                DbError::connection(err.to_string())
            }
            ErrorKind::Authentication { .. } => DbError::configuration(err.to_string()),
            ErrorKind::InvalidArgument { .. } => DbError::validation(err.to_string()),
            // Write errors (including E11000 duplicate keys), command errors and
            // serialization failures all surface as generic query errors.
            _ => DbError::query(err.to_string()),
        }
    }
}
