mod common;

use bson::oid::ObjectId;
use common::mongo::{drop_database, test_database};
use gift_exchange_backend::dto::user_dto::RegisterRequest;
use gift_exchange_backend::model::user::{User, UserChanges};
use gift_exchange_backend::repository::repository_error::RepositoryError;
use gift_exchange_backend::repository::user_repo::{UserRepository, UserRepositoryImpl};
use gift_exchange_backend::service::user_service::{UserService, UserServiceImpl};
use gift_exchange_backend::util::error::ServiceError;
use std::sync::Arc;

fn user(name: &str, email: &str) -> User {
    User {
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        password: Some("pw".to_string()),
        ..User::default()
    }
}

#[tokio::test]
async fn test_unique_email_index_rejects_second_insert() {
    let Some(db) = test_database().await else { return };
    let repo = UserRepositoryImpl::new(&db);

    let first = repo.insert(user("A", "a@x.com")).await.expect("first insert");
    let err = repo.insert(user("B", "a@x.com")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(_)), "{:?}", err);

    let users = repo.list().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, first.id);
    assert_eq!(users[0].name.as_deref(), Some("A"));
    drop_database(db).await;
}

#[tokio::test]
async fn test_update_to_taken_email_is_duplicate() {
    let Some(db) = test_database().await else { return };
    let repo = UserRepositoryImpl::new(&db);
    repo.insert(user("A", "a@x.com")).await.unwrap();
    let b = repo.insert(user("B", "b@x.com")).await.unwrap();

    let changes = UserChanges { email: Some("a@x.com".to_string()), ..UserChanges::default() };
    let err = repo.update(b.id.unwrap(), changes).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists(_)), "{:?}", err);
    drop_database(db).await;
}

#[tokio::test]
async fn test_update_and_delete() {
    let Some(db) = test_database().await else { return };
    let repo = UserRepositoryImpl::new(&db);
    let created = repo.insert(user("A", "a@x.com")).await.unwrap();
    let id = created.id.unwrap();

    // Nothing to set still returns the stored record.
    let unchanged = repo.update(id, UserChanges::default()).await.unwrap();
    assert_eq!(unchanged, created);

    let changes = UserChanges { phone_number: Some("555".to_string()), ..UserChanges::default() };
    let updated = repo.update(id, changes).await.unwrap();
    assert_eq!(updated.phone_number.as_deref(), Some("555"));
    assert_eq!(updated.name.as_deref(), Some("A"));

    let found = repo.find_by_credentials("a@x.com", "pw").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(Some(id)));
    assert!(repo.find_by_credentials("a@x.com", "nope").await.unwrap().is_none());

    let deleted = repo.delete(id).await.unwrap();
    assert_eq!(deleted.phone_number.as_deref(), Some("555"));
    assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));
    assert!(matches!(
        repo.update(ObjectId::new(), UserChanges::default()).await,
        Err(RepositoryError::NotFound(_))
    ));
    drop_database(db).await;
}

#[tokio::test]
async fn test_register_twice_through_service() {
    let Some(db) = test_database().await else { return };
    let service = UserServiceImpl::new(Arc::new(UserRepositoryImpl::new(&db)));
    let request = RegisterRequest {
        name: Some("A".to_string()),
        email: Some("a@x.com".to_string()),
        password: Some("p".to_string()),
    };
    service.register(request.clone()).await.unwrap();
    let err = service.register(request).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(ref msg) if msg == "Email already registered"));
    drop_database(db).await;
}
