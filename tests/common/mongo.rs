use bson::oid::ObjectId;
use gift_exchange_backend::config::mongo_conf::MongoConfig;
use gift_exchange_backend::repository::mongo;
use mongodb::Database;

/// A fresh, uniquely named database on the configured server, or `None`
/// when no server answers so the caller can skip.
pub async fn test_database() -> Option<Database> {
    let _ = dotenv::dotenv();
    let mut config = MongoConfig::from_env().expect("mongo config");
    config.database = format!("gift-exchange-test-{}", ObjectId::new().to_hex());
    config.connection_timeout_secs = 2;
    let db = mongo::connect(&config).await.ok()?;
    if !mongo::ping(&db).await {
        eprintln!("MongoDB not reachable at {}, skipping", config.uri);
        return None;
    }
    mongo::ensure_indexes(&db).await;
    Some(db)
}

pub async fn drop_database(db: Database) {
    let _ = db.drop(None).await;
}
