//! Shared configuration structures.
//!
//! These are plain values; loading them from the environment is left to
//! each service binary.

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Log level
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// MongoDB connection configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct MongoConfig {
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Database the credentials are defined in
    pub auth_database: String,
    /// Database holding the service collections
    pub database_name: String,
}

impl MongoConfig {
    /// Assemble the connection URI for the driver.
    pub fn connection_string(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/{}?authSource={}",
            self.user, self.password, self.host, self.port, self.database_name, self.auth_database
        )
    }
}

impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth_database", &self.auth_database)
            .field("database_name", &self.database_name)
            .finish()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            user: "admin".to_string(),
            password: "test".to_string(),
            host: "localhost".to_string(),
            port: 27017,
            auth_database: "admin".to_string(),
            database_name: "app".to_string(),
        }
    }
}
