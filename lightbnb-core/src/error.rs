/// Structured error types for the LightBnB data-access layer.
///
/// Uses `thiserror` for better API surface and error composition.
/// Nothing is handled or translated here: driver failures (connectivity,
/// constraint violations, malformed SQL) are surfaced verbatim to the
/// caller, which owns any user-visible formatting.
use thiserror::Error;

/// Main error type for gateway operations
#[derive(Error, Debug)]
pub enum DbError {
    /// Any failure raised by the database driver
    #[error("database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    /// Schema migration failed (test harnesses only; production schemas
    /// are owned by the external database)
    #[error("migration error: {source}")]
    Migrate {
        #[from]
        source: sqlx::migrate::MigrateError,
    },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::config("DATABASE_URL not set");
        assert_eq!(err.to_string(), "configuration error: DATABASE_URL not set");
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let db_err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(db_err, DbError::Database { .. }));
    }
}
