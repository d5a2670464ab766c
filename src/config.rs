//! Database configuration module for staff-db
//!
//! Provides configuration options for database connections,
//! including both local SQLite and remote Turso configurations.

/// Configuration for database connections
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database path or URL
    pub path: String,
    /// Authentication token for remote databases (Turso)
    pub auth_token: Option<String>,
    /// Connection timeout in seconds
    pub timeout_secs: u64,
}

impl DatabaseConfig {
    /// Create a new database configuration with default settings
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: path.into(),
            auth_token: None,
            timeout_secs: 30,
        }
    }

    /// Create configuration for local SQLite database
    pub fn local<P: Into<String>>(path: P) -> Self {
        Self::new(path)
    }

    /// Create configuration for remote Turso database
    pub fn turso<P: Into<String>>(url: P, auth_token: String) -> Self {
        Self {
            path: url.into(),
            auth_token: Some(auth_token),
            timeout_secs: 30,
        }
    }

    /// Set authentication token
    pub fn with_auth_token(mut self, token: String) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check if this is a remote database configuration
    pub fn is_remote(&self) -> bool {
        self.path.starts_with("libsql://") || self.auth_token.is_some()
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:" || self.path.contains("mode=memory")
    }

    /// Get database type description
    pub fn database_type(&self) -> &'static str {
        if self.is_memory() {
            "in-memory SQLite"
        } else if self.is_remote() {
            "Turso (remote SQLite)"
        } else {
            "local SQLite"
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("data/staff.db")
    }
}

impl<P: Into<String>> From<P> for DatabaseConfig {
    fn from(path: P) -> Self {
        Self::new(path)
    }
}

/// Builder for database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    /// Create a new configuration builder
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            config: DatabaseConfig::new(path),
        }
    }

    /// Build the configuration
    pub fn build(self) -> DatabaseConfig {
        self.config
    }

    /// Set authentication token
    pub fn auth_token(mut self, token: String) -> Self {
        self.config.auth_token = Some(token);
        self
    }

    /// Set connection timeout
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }
}
