//! User service configuration.

use std::env;

use common::{MongoConfig, ServiceConfig};

/// Collection holding user documents unless overridden
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Service name and log level
    pub service: ServiceConfig,
    /// MongoDB connection settings
    pub mongo: MongoConfig,
    /// Collection holding user documents
    pub collection: String,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                log_level: env::var("USER_SERVICE_LOG_LEVEL")
                    .or_else(|_| env::var("RUST_LOG"))
                    .unwrap_or(defaults.service.log_level),
            },
            mongo: MongoConfig {
                user: env::var("MONGO_USER").unwrap_or(defaults.mongo.user),
                password: env::var("MONGO_PASSWORD").unwrap_or(defaults.mongo.password),
                host: env::var("MONGO_HOST").unwrap_or(defaults.mongo.host),
                port: env::var("MONGO_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.mongo.port),
                auth_database: env::var("MONGO_AUTH_BASE").unwrap_or(defaults.mongo.auth_database),
                database_name: env::var("MONGO_DB").unwrap_or(defaults.mongo.database_name),
            },
            collection: env::var("USER_SERVICE_COLLECTION").unwrap_or(defaults.collection),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level: "info".to_string(),
            },
            mongo: MongoConfig {
                database_name: "users".to_string(),
                ..MongoConfig::default()
            },
            collection: DEFAULT_USERS_COLLECTION.to_string(),
        }
    }
}
