use crate::{
    models::USERS_COLLECTION,
    services::user_store::{EMAIL_INDEX, USERNAME_INDEX},
};
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client, Collection, Database, IndexModel,
};
use std::error::Error;

const DEFAULT_DB_NAME: &str = "accounts";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&database_name(uri));

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique indexes on `users.email` and `users.username`.
    /// These are what actually guarantee one account per email and per username.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<Document>(USERS_COLLECTION);

        for (field, name) in [("email", EMAIL_INDEX), ("username", USERNAME_INDEX)] {
            let mut keys = Document::new();
            keys.insert(field, 1);

            let index = IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(name.to_string())
                        .build(),
                )
                .build();

            // A failure here leaves uniqueness unenforced, so it aborts startup
            users.create_index(index).await?;
            log::info!("   ✅ Index ready: {}({}) unique", USERS_COLLECTION, field);
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// Database name from the URI path, e.g. `mongodb://host:27017/accounts?retryWrites=true`
pub fn database_name(uri: &str) -> String {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name_from_uri() {
        assert_eq!(database_name("mongodb://localhost:27017/accounts_dev"), "accounts_dev");
        assert_eq!(
            database_name("mongodb+srv://u:p@cluster0.example.net/prod?retryWrites=true&w=majority"),
            "prod"
        );
    }

    #[test]
    fn test_database_name_defaults() {
        assert_eq!(database_name("mongodb://localhost:27017"), "accounts");
        assert_eq!(database_name("mongodb://localhost:27017/"), "accounts");
        assert_eq!(database_name("mongodb://localhost:27017/?authSource=admin"), "accounts");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/accounts_test".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
        assert!(db.unwrap().ping().await.is_ok());
    }
}
