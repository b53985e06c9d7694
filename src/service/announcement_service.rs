use crate::model::announcement::{Announcement, AnnouncementFields};
use crate::repository::announcement_repo::AnnouncementRepository;
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;

pub const ANNOUNCEMENT_NOT_FOUND: &str = "Announcement not found";

#[async_trait]
pub trait AnnouncementService: Send + Sync {
    async fn list_announcements(&self) -> Result<Vec<Announcement>, ServiceError>;
    async fn create_announcement(&self, fields: AnnouncementFields) -> Result<Announcement, ServiceError>;
    async fn update_announcement(&self, id: ObjectId, fields: AnnouncementFields) -> Result<Announcement, ServiceError>;
    async fn delete_announcement(&self, id: ObjectId) -> Result<Announcement, ServiceError>;
}

pub struct AnnouncementServiceImpl {
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
}

impl AnnouncementServiceImpl {
    pub fn new(announcement_repo: Arc<dyn AnnouncementRepository>) -> Self {
        Self { announcement_repo }
    }
}

fn not_found_or(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound(_) => ServiceError::NotFound(ANNOUNCEMENT_NOT_FOUND.to_string()),
        other => other.into(),
    }
}

#[async_trait]
impl AnnouncementService for AnnouncementServiceImpl {
    async fn list_announcements(&self) -> Result<Vec<Announcement>, ServiceError> {
        Ok(self.announcement_repo.list().await?)
    }

    async fn create_announcement(&self, fields: AnnouncementFields) -> Result<Announcement, ServiceError> {
        let announcement = Announcement {
            id: None,
            title: fields.title,
            content: fields.content,
            created_at: None,
        };
        Ok(self.announcement_repo.insert(announcement).await?)
    }

    async fn update_announcement(&self, id: ObjectId, fields: AnnouncementFields) -> Result<Announcement, ServiceError> {
        self.announcement_repo.update(id, fields).await.map_err(not_found_or)
    }

    async fn delete_announcement(&self, id: ObjectId) -> Result<Announcement, ServiceError> {
        self.announcement_repo.delete(id).await.map_err(not_found_or)
    }
}
