//! Process-local repositories with the same contracts as the MongoDB ones,
//! including the unique email constraint. Used to run the service and the
//! router without a database.

use crate::model::announcement::{Announcement, AnnouncementFields};
use crate::model::exchange_date::ExchangeDate;
use crate::model::gift::{Gift, GiftChanges};
use crate::model::user::{User, UserChanges};
use crate::repository::announcement_repo::AnnouncementRepository;
use crate::repository::exchange_date_repo::ExchangeDateRepository;
use crate::repository::gift_repo::GiftRepository;
use crate::repository::now_timestamp;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::user_repo::UserRepository;
use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;
        // A missing email takes part in uniqueness like the store's index does.
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists(format!("Duplicate key: email {:?}", user.email)));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.email.as_deref() == Some(email)).cloned())
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email) && u.password.as_deref() == Some(password))
            .cloned())
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> RepositoryResult<User> {
        let mut users = self.users.write().await;
        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.id != Some(id) && u.email.as_ref() == Some(email)) {
                return Err(RepositoryError::already_exists(format!("Duplicate key: email {}", email)));
            }
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No user found to update for ID: {}", id)))?;
        changes.apply(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<User> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No user found to delete for ID: {}", id)))?;
        Ok(users.remove(index))
    }
}

#[derive(Default)]
pub struct InMemoryGiftRepository {
    gifts: RwLock<Vec<Gift>>,
}

impl InMemoryGiftRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GiftRepository for InMemoryGiftRepository {
    async fn list(&self) -> RepositoryResult<Vec<Gift>> {
        Ok(self.gifts.read().await.clone())
    }

    async fn insert(&self, mut gift: Gift) -> RepositoryResult<Gift> {
        gift.id = Some(ObjectId::new());
        let now = now_timestamp();
        gift.created_at = Some(now);
        gift.updated_at = Some(now);
        self.gifts.write().await.push(gift.clone());
        Ok(gift)
    }

    async fn update(&self, id: ObjectId, changes: GiftChanges) -> RepositoryResult<Gift> {
        let mut gifts = self.gifts.write().await;
        let gift = gifts
            .iter_mut()
            .find(|g| g.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No gift found to update for ID: {}", id)))?;
        changes.apply(gift);
        gift.updated_at = Some(now_timestamp());
        Ok(gift.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<Gift> {
        let mut gifts = self.gifts.write().await;
        let index = gifts
            .iter()
            .position(|g| g.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No gift found to delete for ID: {}", id)))?;
        Ok(gifts.remove(index))
    }
}

#[derive(Default)]
pub struct InMemoryAnnouncementRepository {
    announcements: RwLock<Vec<Announcement>>,
}

impl InMemoryAnnouncementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryAnnouncementRepository {
    async fn list(&self) -> RepositoryResult<Vec<Announcement>> {
        Ok(self.announcements.read().await.clone())
    }

    async fn insert(&self, mut announcement: Announcement) -> RepositoryResult<Announcement> {
        announcement.id = Some(ObjectId::new());
        if announcement.created_at.is_none() {
            announcement.created_at = Some(now_timestamp());
        }
        self.announcements.write().await.push(announcement.clone());
        Ok(announcement)
    }

    async fn update(&self, id: ObjectId, changes: AnnouncementFields) -> RepositoryResult<Announcement> {
        let mut announcements = self.announcements.write().await;
        let announcement = announcements
            .iter_mut()
            .find(|a| a.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No announcement found to update for ID: {}", id)))?;
        changes.apply(announcement);
        Ok(announcement.clone())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<Announcement> {
        let mut announcements = self.announcements.write().await;
        let index = announcements
            .iter()
            .position(|a| a.id == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No announcement found to delete for ID: {}", id)))?;
        Ok(announcements.remove(index))
    }
}

#[derive(Default)]
pub struct InMemoryExchangeDateRepository {
    current: RwLock<Option<ExchangeDate>>,
}

impl InMemoryExchangeDateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExchangeDateRepository for InMemoryExchangeDateRepository {
    async fn set(&self, date_time: Option<DateTime<Utc>>) -> RepositoryResult<ExchangeDate> {
        let record = ExchangeDate::new(date_time);
        *self.current.write().await = Some(record.clone());
        Ok(record)
    }

    async fn get(&self) -> RepositoryResult<Option<ExchangeDate>> {
        Ok(self.current.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User {
            name: Some("Test".to_string()),
            email: Some(email.to_string()),
            password: Some("pw".to_string()),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@x.com")).await.unwrap();
        let err = repo.insert(user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@x.com")).await.unwrap();
        let b = repo.insert(user("b@x.com")).await.unwrap();
        let changes = UserChanges { email: Some("a@x.com".to_string()), ..UserChanges::default() };
        let err = repo.update(b.id.unwrap(), changes).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_exchange_date_keeps_single_record() {
        let repo = InMemoryExchangeDateRepository::new();
        assert!(repo.get().await.unwrap().is_none());
        let first = DateTime::from_timestamp_millis(1_735_000_000_000).unwrap();
        let second = first + chrono::Duration::days(1);
        repo.set(Some(first)).await.unwrap();
        repo.set(Some(second)).await.unwrap();
        assert_eq!(repo.get().await.unwrap().unwrap().date_time(), Some(second));
    }
}
