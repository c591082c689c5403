//! Centralized error types for the Stockroom backend.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides short, operator-facing messages for logs and startup failures
//! - Preserves full error context for debugging

use thiserror::Error;

/// Top-level application error type.
///
/// Startup and wiring failures in the binary are expressed with this type.
/// Request-level errors have their own types in the service crates.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a short message suitable for an operator reading the console.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Database(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file or socket operation failed.",
            AppError::Other(_) => "An unexpected error occurred.",
        }
    }

    /// Recover the typed cause from an `anyhow` chain, such as the one
    /// returned by `Config::load_validated`.
    ///
    /// Falls back to `AppError::Other` when no known error type is inside.
    pub fn classify(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return AppError::Config(e),
            Err(err) => err,
        };
        let err = match err.downcast::<DatabaseError>() {
            Ok(e) => return AppError::Database(e),
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(e) => AppError::Io(e),
            Err(err) => AppError::Other(err),
        }
    }
}

/// Database/storage errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DatabaseError::ConnectionFailed(_) => {
                "Unable to open the item database. Check the database path."
            }
            DatabaseError::QueryFailed(_) => "A data operation failed. Please try again.",
            DatabaseError::Corruption(_) => {
                "Stored item data is corrupted. Inspect the database file."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                DatabaseError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                DatabaseError::ConnectionFailed(self.to_string())
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..) => DatabaseError::Corruption(self.to_string()),
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let db_err = DatabaseError::QueryFailed("boom".into());
        let app_err: AppError = db_err.into();
        assert!(matches!(app_err, AppError::Database(DatabaseError::QueryFailed(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Config(ConfigError::Invalid("server.port: must be > 0".into()));
        assert_eq!(
            app_err.user_message(),
            "Invalid configuration. Check your settings."
        );
    }

    #[test]
    fn test_classify_finds_config_error_under_context() {
        use anyhow::Context;

        let result: Result<(), ConfigError> = Err(ConfigError::ParseError("bad toml".into()));
        let err = result.context("Failed to parse config file").unwrap_err();

        assert!(matches!(
            AppError::classify(err),
            AppError::Config(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_classify_finds_io_error() {
        use anyhow::Context;

        let result = std::fs::read_to_string("/nonexistent/stockroom/config.toml")
            .context("Failed to read config file");
        let app_err = AppError::classify(result.unwrap_err());

        assert!(matches!(app_err, AppError::Io(_)));
        assert_eq!(app_err.user_message(), "A file or socket operation failed.");
    }

    #[test]
    fn test_classify_unknown_is_other() {
        let app_err = AppError::classify(anyhow::anyhow!("something else"));
        assert!(matches!(app_err, AppError::Other(_)));
    }

    #[test]
    fn test_rusqlite_query_error_maps_to_query_failed() {
        let err = rusqlite::Error::QueryReturnedNoRows.into_database_error();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn test_rusqlite_type_error_maps_to_corruption() {
        let err = rusqlite::Error::InvalidColumnType(
            0,
            "price".to_string(),
            rusqlite::types::Type::Integer,
        )
        .into_database_error();
        assert!(matches!(err, DatabaseError::Corruption(_)));
    }
}
