use crate::dto::gift_dto::{GiftForm, UploadedFile};
use crate::model::gift::Gift;
use crate::repository::gift_repo::GiftRepository;
use crate::repository::repository_error::RepositoryError;
use crate::util::error::ServiceError;
use crate::util::upload::UploadStore;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{error, info, instrument};

pub const GIFT_NOT_FOUND: &str = "Gift not found";

#[async_trait]
pub trait GiftService: Send + Sync {
    async fn list_gifts(&self) -> Result<Vec<Gift>, ServiceError>;
    async fn create_gift(&self, form: GiftForm) -> Result<Gift, ServiceError>;
    async fn update_gift(&self, id: ObjectId, form: GiftForm) -> Result<Gift, ServiceError>;
    async fn delete_gift(&self, id: ObjectId) -> Result<Gift, ServiceError>;
}

pub struct GiftServiceImpl {
    pub gift_repo: Arc<dyn GiftRepository>,
    pub uploads: Arc<UploadStore>,
    /// When false, an update without a file clears the image path.
    pub keep_image_on_update: bool,
}

impl GiftServiceImpl {
    pub fn new(gift_repo: Arc<dyn GiftRepository>, uploads: Arc<UploadStore>, keep_image_on_update: bool) -> Self {
        Self { gift_repo, uploads, keep_image_on_update }
    }

    async fn store_image(&self, image: Option<&UploadedFile>) -> Result<Option<String>, ServiceError> {
        match image {
            Some(file) => {
                let path = self.uploads.save(file).await.map_err(|e| {
                    error!("Failed to store gift image: {}", e);
                    ServiceError::InternalError(e.to_string())
                })?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

fn not_found_or(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound(_) => ServiceError::NotFound(GIFT_NOT_FOUND.to_string()),
        other => other.into(),
    }
}

#[async_trait]
impl GiftService for GiftServiceImpl {
    async fn list_gifts(&self) -> Result<Vec<Gift>, ServiceError> {
        Ok(self.gift_repo.list().await?)
    }

    #[instrument(skip(self, form), fields(has_image = form.image.is_some()))]
    async fn create_gift(&self, form: GiftForm) -> Result<Gift, ServiceError> {
        let image = self.store_image(form.image.as_ref()).await?.unwrap_or_default();
        let gift = self.gift_repo.insert(form.fields.into_gift(image)).await?;
        info!("Gift created");
        Ok(gift)
    }

    #[instrument(skip(self, form), fields(id = %id, has_image = form.image.is_some()))]
    async fn update_gift(&self, id: ObjectId, form: GiftForm) -> Result<Gift, ServiceError> {
        let image = match self.store_image(form.image.as_ref()).await? {
            Some(path) => Some(path),
            None if self.keep_image_on_update => None,
            None => Some(String::new()),
        };
        let changes = form.fields.into_changes(image);
        self.gift_repo.update(id, changes).await.map_err(not_found_or)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_gift(&self, id: ObjectId) -> Result<Gift, ServiceError> {
        // Image files stay on disk.
        self.gift_repo.delete(id).await.map_err(not_found_or)
    }
}
