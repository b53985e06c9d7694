use crate::model::gift::{Gift, GiftChanges};
use crate::repository::mongo::{find_all, GIFTS_COLLECTION};
use crate::repository::now_timestamp;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{error, info, instrument};

#[async_trait]
pub trait GiftRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<Gift>>;
    async fn insert(&self, gift: Gift) -> RepositoryResult<Gift>;
    async fn update(&self, id: ObjectId, changes: GiftChanges) -> RepositoryResult<Gift>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Gift>;
}

pub struct MongoGiftRepository {
    collection: mongodb::Collection<Gift>,
}

impl MongoGiftRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoGiftRepository { collection: db.collection::<Gift>(GIFTS_COLLECTION) }
    }
}

#[async_trait]
impl GiftRepository for MongoGiftRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<Gift>> {
        let gifts = find_all(&self.collection).await?;
        info!("Fetched {} gifts", gifts.len());
        Ok(gifts)
    }

    #[instrument(skip(self, gift), fields(name = ?gift.name))]
    async fn insert(&self, mut gift: Gift) -> RepositoryResult<Gift> {
        gift.id = Some(ObjectId::new());
        let now = now_timestamp();
        gift.created_at = Some(now);
        gift.updated_at = Some(now);
        match self.collection.insert_one(&gift, None).await {
            Ok(_) => {
                info!("Gift created");
                Ok(gift)
            }
            Err(e) => {
                error!("Failed to create gift: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: GiftChanges) -> RepositoryResult<Gift> {
        let mut set = changes.to_set_document();
        set.insert("updatedAt", now_timestamp());
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, options)
            .await?;
        match updated {
            Some(gift) => {
                info!("Gift updated");
                Ok(gift)
            }
            None => {
                error!("No gift found to update for ID: {}", id);
                Err(RepositoryError::not_found(format!("No gift found to update for ID: {}", id)))
            }
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Gift> {
        match self.collection.find_one_and_delete(doc! { "_id": id }, None).await? {
            Some(gift) => {
                info!("Gift deleted");
                Ok(gift)
            }
            None => Err(RepositoryError::not_found(format!("No gift found to delete for ID: {}", id))),
        }
    }
}
