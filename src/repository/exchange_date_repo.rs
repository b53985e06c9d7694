use crate::model::exchange_date::{ExchangeDate, EXCHANGE_DATE_KEY};
use crate::repository::mongo::EXCHANGE_DATES_COLLECTION;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};
use tracing::{info, instrument, warn};

/// Holds at most one record, addressed by [`EXCHANGE_DATE_KEY`].
#[async_trait]
pub trait ExchangeDateRepository: Send + Sync {
    async fn set(&self, date_time: Option<DateTime<Utc>>) -> RepositoryResult<ExchangeDate>;
    async fn get(&self) -> RepositoryResult<Option<ExchangeDate>>;
}

pub struct MongoExchangeDateRepository {
    collection: mongodb::Collection<ExchangeDate>,
    raw: mongodb::Collection<Document>,
}

impl MongoExchangeDateRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoExchangeDateRepository {
            collection: db.collection::<ExchangeDate>(EXCHANGE_DATES_COLLECTION),
            raw: db.collection::<Document>(EXCHANGE_DATES_COLLECTION),
        }
    }

    async fn purge_stale(&self) -> RepositoryResult<u64> {
        let purged = self
            .raw
            .delete_many(doc! { "_id": { "$ne": EXCHANGE_DATE_KEY } }, None)
            .await?;
        if purged.deleted_count > 0 {
            warn!("Removed {} stale exchange date documents", purged.deleted_count);
        }
        Ok(purged.deleted_count)
    }

    /// Re-keys a record written under a generated id (one clear-then-insert
    /// per set) to [`EXCHANGE_DATE_KEY`]. Returns the keyed record, if any.
    #[instrument(skip(self))]
    pub async fn adopt_legacy(&self) -> RepositoryResult<Option<ExchangeDate>> {
        if let Some(current) = self.collection.find_one(doc! { "_id": EXCHANGE_DATE_KEY }, None).await? {
            return Ok(Some(current));
        }
        let Some(legacy) = self.raw.find_one(doc! {}, None).await? else {
            return Ok(None);
        };
        let mut record = doc! { "_id": EXCHANGE_DATE_KEY };
        if let Some(date_time) = legacy.get("dateTime") {
            record.insert("dateTime", date_time.clone());
        }
        match self.raw.insert_one(record, None).await.map_err(RepositoryError::from) {
            Ok(_) => info!("Adopted exchange date document {:?}", legacy.get("_id")),
            // Another request adopted it first.
            Err(RepositoryError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }
        self.purge_stale().await?;
        Ok(self.collection.find_one(doc! { "_id": EXCHANGE_DATE_KEY }, None).await?)
    }
}

#[async_trait]
impl ExchangeDateRepository for MongoExchangeDateRepository {
    #[instrument(skip(self), fields(date_time = ?date_time))]
    async fn set(&self, date_time: Option<DateTime<Utc>>) -> RepositoryResult<ExchangeDate> {
        let record = ExchangeDate::new(date_time);
        let options = FindOneAndReplaceOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let stored = self
            .collection
            .find_one_and_replace(doc! { "_id": EXCHANGE_DATE_KEY }, &record, options)
            .await?
            .ok_or_else(|| RepositoryError::database("Upsert of exchange date returned no document"))?;

        self.purge_stale().await?;
        info!("Exchange date set");
        Ok(stored)
    }

    async fn get(&self) -> RepositoryResult<Option<ExchangeDate>> {
        self.adopt_legacy().await
    }
}
