mod common;

use bson::{doc, oid::ObjectId, Document};
use common::mongo::{drop_database, test_database};
use gift_exchange_backend::model::announcement::AnnouncementFields;
use gift_exchange_backend::model::gift::{Gift, GiftChanges};
use gift_exchange_backend::repository::announcement_repo::{AnnouncementRepository, MongoAnnouncementRepository};
use gift_exchange_backend::repository::gift_repo::{GiftRepository, MongoGiftRepository};
use gift_exchange_backend::repository::mongo::{ANNOUNCEMENTS_COLLECTION, GIFTS_COLLECTION};
use gift_exchange_backend::repository::repository_error::RepositoryError;

#[tokio::test]
async fn test_gift_workflow() {
    let Some(db) = test_database().await else { return };
    let repo = MongoGiftRepository::new(&db);
    let gift = Gift { name: Some("Mug".to_string()), amount: Some(250.0), ..Gift::default() };

    let created = repo.insert(gift).await.unwrap();
    let id = created.id.unwrap();
    assert!(created.created_at.is_some());

    let changes = GiftChanges { image: Some(String::new()), level: Some("2".to_string()), ..GiftChanges::default() };
    let updated = repo.update(id, changes).await.unwrap();
    assert_eq!(updated.level.as_deref(), Some("2"));
    assert_eq!(updated.amount, Some(250.0));
    assert_eq!(updated.created_at, created.created_at);

    let raw = db.collection::<Document>(GIFTS_COLLECTION).find_one(doc! { "_id": id }, None).await.unwrap().unwrap();
    assert!(raw.get_datetime("createdAt").is_ok());
    assert!(raw.get_datetime("updatedAt").is_ok());

    repo.delete(id).await.unwrap();
    assert!(matches!(repo.delete(id).await, Err(RepositoryError::NotFound(_))));
    drop_database(db).await;
}

#[tokio::test]
async fn test_lists_documents_with_date_timestamps() {
    let Some(db) = test_database().await else { return };
    let created = bson::DateTime::from_millis(1_703_376_000_000);
    db.collection::<Document>(GIFTS_COLLECTION)
        .insert_one(
            doc! {
                "_id": ObjectId::new(), "name": "Scarf", "amount": 300, "image": "/uploads/1-scarf.png",
                "userId": ObjectId::new(), "createdAt": created, "updatedAt": created, "__v": 0,
            },
            None,
        )
        .await
        .unwrap();
    db.collection::<Document>(ANNOUNCEMENTS_COLLECTION)
        .insert_one(doc! { "_id": ObjectId::new(), "title": "t", "content": "c", "createdAt": created, "__v": 0 }, None)
        .await
        .unwrap();

    let gifts = MongoGiftRepository::new(&db).list().await.unwrap();
    assert_eq!(gifts.len(), 1);
    assert_eq!(gifts[0].amount, Some(300.0));
    assert_eq!(gifts[0].created_at, Some(created));

    let announcements = MongoAnnouncementRepository::new(&db);
    let listed = announcements.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    let id = listed[0].id.unwrap();

    // An update with nothing to set reads the record back.
    let same = announcements.update(id, AnnouncementFields::default()).await.unwrap();
    assert_eq!(same.created_at, Some(created));
    drop_database(db).await;
}
