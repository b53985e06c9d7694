use crate::model::announcement::{Announcement, AnnouncementFields};
use crate::repository::mongo::{find_all, ANNOUNCEMENTS_COLLECTION};
use crate::repository::now_timestamp;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{info, instrument};

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<Announcement>>;
    async fn insert(&self, announcement: Announcement) -> RepositoryResult<Announcement>;
    async fn update(&self, id: ObjectId, changes: AnnouncementFields) -> RepositoryResult<Announcement>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Announcement>;
}

pub struct MongoAnnouncementRepository {
    collection: mongodb::Collection<Announcement>,
}

impl MongoAnnouncementRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        MongoAnnouncementRepository { collection: db.collection::<Announcement>(ANNOUNCEMENTS_COLLECTION) }
    }
}

#[async_trait]
impl AnnouncementRepository for MongoAnnouncementRepository {
    async fn list(&self) -> RepositoryResult<Vec<Announcement>> {
        find_all(&self.collection).await
    }

    #[instrument(skip(self, announcement), fields(title = ?announcement.title))]
    async fn insert(&self, mut announcement: Announcement) -> RepositoryResult<Announcement> {
        announcement.id = Some(ObjectId::new());
        if announcement.created_at.is_none() {
            announcement.created_at = Some(now_timestamp());
        }
        self.collection.insert_one(&announcement, None).await?;
        info!("Announcement created");
        Ok(announcement)
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: AnnouncementFields) -> RepositoryResult<Announcement> {
        let filter = doc! { "_id": id };
        let set = changes.to_set_document();
        let updated = if set.is_empty() {
            self.collection.find_one(filter, None).await?
        } else {
            let options = FindOneAndUpdateOptions::builder()
                .return_document(ReturnDocument::After)
                .build();
            self.collection.find_one_and_update(filter, doc! { "$set": set }, options).await?
        };
        updated.ok_or_else(|| RepositoryError::not_found(format!("No announcement found to update for ID: {}", id)))
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<Announcement> {
        self.collection
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("No announcement found to delete for ID: {}", id)))
    }
}
