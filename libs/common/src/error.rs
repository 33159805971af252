//! Error types for the shared persistence layer
//!
//! Repositories in every service return [`DatabaseResult`] so callers can
//! tell connection problems, failed queries and constraint violations apart.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A uniqueness or foreign key constraint rejected the write
    #[error("Database constraint violated: {0}")]
    Constraint(String),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify an error raised by a write statement.
    pub fn from_write(err: SqlxError) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() || db_err.is_foreign_key_violation() => {
                Self::Constraint(db_err.message().to_string())
            }
            _ => Self::Query(err),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
