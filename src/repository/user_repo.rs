use crate::model::user::{User, UserChanges};
use crate::repository::mongo::{find_all, USERS_COLLECTION};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use tracing::{error, info, instrument};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<User>>;
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_credentials(&self, email: &str, password: &str) -> RepositoryResult<Option<User>>;
    /// Returns the record after the update.
    async fn update(&self, id: ObjectId, changes: UserChanges) -> RepositoryResult<User>;
    /// Returns the record as it was before removal.
    async fn delete(&self, id: ObjectId) -> RepositoryResult<User>;
}

pub struct UserRepositoryImpl {
    collection: mongodb::Collection<User>,
}

impl UserRepositoryImpl {
    pub fn new(db: &mongodb::Database) -> Self {
        UserRepositoryImpl { collection: db.collection::<User>(USERS_COLLECTION) }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    #[instrument(skip(self))]
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let users = find_all(&self.collection).await?;
        info!("Fetched {} users", users.len());
        Ok(users)
    }

    #[instrument(skip(self, user), fields(email = ?user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        match self.collection.insert_one(&user, None).await {
            Ok(_) => {
                info!("User inserted");
                Ok(user)
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to find user by email: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(user)
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email, "password": password };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to look up credentials: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(user)
    }

    #[instrument(skip(self, changes), fields(id = %id))]
    async fn update(&self, id: ObjectId, changes: UserChanges) -> RepositoryResult<User> {
        let filter = doc! { "_id": id };
        let set = changes.to_set_document();
        let updated = if set.is_empty() {
            self.collection.find_one(filter, None).await?
        } else {
            let options = FindOneAndUpdateOptions::builder()
                .return_document(ReturnDocument::After)
                .build();
            self.collection
                .find_one_and_update(filter, doc! { "$set": set }, options)
                .await?
        };
        match updated {
            Some(user) => {
                info!("User updated");
                Ok(user)
            }
            None => Err(RepositoryError::not_found(format!("No user found to update for ID: {}", id))),
        }
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<User> {
        let deleted = self.collection.find_one_and_delete(doc! { "_id": id }, None).await?;
        match deleted {
            Some(user) => {
                info!("User deleted");
                Ok(user)
            }
            None => Err(RepositoryError::not_found(format!("No user found to delete for ID: {}", id))),
        }
    }
}
