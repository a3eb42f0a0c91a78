//! Database connection and initialization.

use common::{AppResult, MongoConfig};
use mongodb::bson::{doc, Document};
use mongodb::{Client, Database as MongoDatabase};

use crate::mongo::MongoStore;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    database: MongoDatabase,
}

impl Database {
    /// Connect with the given configuration and check the server answers.
    pub async fn connect(config: &MongoConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(config.connection_string()).await?;
        let database = client.database(&config.database_name);
        let db = Self { database };

        db.ping().await?;
        tracing::info!(
            host = %config.host,
            database = %config.database_name,
            "Database connected"
        );

        Ok(db)
    }

    /// Document store over one collection of this database.
    pub fn store(&self, collection: &str) -> MongoStore {
        MongoStore::new(self.database.collection::<Document>(collection))
    }

    /// Check database connectivity.
    pub async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
