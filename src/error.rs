//! Error handling module for staff-db
//!
//! Provides error types for database operations with detailed context.
//! The library surfaces typed errors; the demo binaries use anyhow and
//! let failures propagate out of main.

use thiserror::Error;

/// Result type for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors raised by directory database operations
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Connection-related errors
    #[error("Database connection failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution errors
    #[error("Query execution failed: {query}")]
    Query {
        query: String,
        #[source]
        source: turso::Error,
    },

    /// Schema-related errors
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Row-to-struct mapping errors
    #[error("Row mapping failed: column {column} of {target}")]
    Mapping {
        column: usize,
        target: &'static str,
        #[source]
        source: turso::Error,
    },

    /// Named-parameter binding errors
    #[error("Named parameter binding failed: {message}")]
    Binding { message: String },

    /// Transaction-related errors
    #[error("Transaction error: {message}")]
    Transaction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem I/O errors
    #[error("Filesystem error: {path}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic database errors
    #[error("Database error: {message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DirectoryError {
    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new connection error with source
    pub fn connection_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new query error
    pub fn query<S: Into<String>>(query: S, source: turso::Error) -> Self {
        Self::Query {
            query: query.into(),
            source,
        }
    }

    /// Create a new schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new row-mapping error
    pub fn mapping(column: usize, target: &'static str, source: turso::Error) -> Self {
        Self::Mapping {
            column,
            target,
            source,
        }
    }

    /// Create a new named-parameter binding error
    pub fn binding<S: Into<String>>(message: S) -> Self {
        Self::Binding {
            message: message.into(),
        }
    }

    /// Create a new transaction error
    pub fn transaction<S: Into<String>>(message: S) -> Self {
        Self::Transaction {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new transaction error with source
    pub fn transaction_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Transaction {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new filesystem error
    pub fn filesystem<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new generic error with source
    pub fn generic_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Generic {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Conversion from turso::Error
impl From<turso::Error> for DirectoryError {
    fn from(err: turso::Error) -> Self {
        Self::Generic {
            message: "Turso database error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Conversion from std::io::Error
impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Filesystem {
            path: "unknown".to_string(),
            source: err,
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: err,
        }
    }
}
