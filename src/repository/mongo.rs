use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use bson::doc;
use futures::stream::StreamExt;
use mongodb::{
    options::{ClientOptions, Credential, IndexOptions, ResolverConfig},
    Client, Collection, Database, IndexModel,
};
use std::time::Duration;
use tracing::{error, info, warn};

pub const USERS_COLLECTION: &str = "users";
pub const GIFTS_COLLECTION: &str = "gifts";
pub const ANNOUNCEMENTS_COLLECTION: &str = "announcements";
pub const EXCHANGE_DATES_COLLECTION: &str = "exchangedates";

/// Build the shared client handle. The driver connects lazily; `ping`
/// reports reachability without failing startup.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("GiftExchangeBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(Duration::from_secs(config.connection_timeout_secs));
    client_options.server_selection_timeout = Some(Duration::from_secs(config.connection_timeout_secs));
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }
    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}

pub async fn ping(db: &Database) -> bool {
    match db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => {
            info!("Connected to MongoDB database '{}'", db.name());
            true
        }
        Err(e) => {
            error!("Failed to connect to MongoDB: {}", e);
            false
        }
    }
}

/// Unique email index backing the duplicate-registration check.
pub async fn ensure_indexes(db: &Database) {
    let users = db.collection::<bson::Document>(USERS_COLLECTION);
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    match users.create_index(email_index, None).await {
        Ok(_) => info!("Index ready: {}(email, unique)", USERS_COLLECTION),
        Err(e) => warn!("Could not create unique email index: {}", e),
    }
}

/// Drain every document of a collection in store order.
pub async fn find_all<T>(collection: &Collection<T>) -> RepositoryResult<Vec<T>>
where
    T: serde::de::DeserializeOwned + Unpin + Send + Sync,
{
    let mut cursor = collection.find(None, None).await?;
    let mut items = Vec::new();
    while let Some(item) = cursor.next().await {
        match item {
            Ok(item) => items.push(item),
            Err(e) => {
                error!("Failed to read from '{}': {}", collection.name(), e);
                return Err(RepositoryError::from(e));
            }
        }
    }
    Ok(items)
}
