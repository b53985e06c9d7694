use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gift {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Public path of the uploaded image, or empty.
    pub image: String,
    /// Owner reference; never checked against the users collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ObjectId>,
    /// Store-managed, written as BSON dates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

/// Partial overwrite of a gift; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiftChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub mode: Option<String>,
    pub store_number: Option<String>,
    pub phone_number: Option<String>,
    pub amount: Option<f64>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub user_id: Option<ObjectId>,
}

impl GiftChanges {
    pub fn to_set_document(&self) -> Document {
        let mut doc = Document::new();
        let text_fields = [
            ("name", &self.name),
            ("description", &self.description),
            ("level", &self.level),
            ("mode", &self.mode),
            ("storeNumber", &self.store_number),
            ("phoneNumber", &self.phone_number),
            ("url", &self.url),
            ("image", &self.image),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                doc.insert(key, value.as_str());
            }
        }
        if let Some(amount) = self.amount {
            doc.insert("amount", amount);
        }
        if let Some(user_id) = self.user_id {
            doc.insert("userId", user_id);
        }
        doc
    }

    pub fn apply(&self, gift: &mut Gift) {
        fn overwrite(target: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *target = Some(value.clone());
            }
        }
        overwrite(&mut gift.name, &self.name);
        overwrite(&mut gift.description, &self.description);
        overwrite(&mut gift.level, &self.level);
        overwrite(&mut gift.mode, &self.mode);
        overwrite(&mut gift.store_number, &self.store_number);
        overwrite(&mut gift.phone_number, &self.phone_number);
        overwrite(&mut gift.url, &self.url);
        if let Some(image) = &self.image {
            gift.image = image.clone();
        }
        if let Some(amount) = self.amount {
            gift.amount = Some(amount);
        }
        if let Some(user_id) = self.user_id {
            gift.user_id = Some(user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_document_with_date_timestamps() {
        let id = ObjectId::new();
        let created = bson::DateTime::from_millis(1_703_376_000_000);
        let doc = bson::doc! {
            "_id": id,
            "name": "Mug",
            "amount": 250,
            "image": "",
            "createdAt": created,
            "updatedAt": created,
            "__v": 0,
        };
        let gift: Gift = bson::from_document(doc).unwrap();
        assert_eq!(gift.id, Some(id));
        assert_eq!(gift.amount, Some(250.0));
        assert_eq!(gift.created_at, Some(created));
        assert_eq!(gift.updated_at, Some(created));
    }

    #[test]
    fn test_decodes_document_without_image() {
        let doc = bson::doc! { "_id": ObjectId::new(), "name": "Socks" };
        let gift: Gift = bson::from_document(doc).unwrap();
        assert_eq!(gift.image, "");
        assert!(gift.created_at.is_none());
    }

    #[test]
    fn test_empty_image_is_still_written() {
        let changes = GiftChanges { image: Some(String::new()), ..GiftChanges::default() };
        let doc = changes.to_set_document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_str("image").unwrap(), "");
    }

    #[test]
    fn test_set_document_uses_stored_field_names() {
        let owner = ObjectId::new();
        let changes = GiftChanges {
            store_number: Some("7-11 #042".to_string()),
            amount: Some(500.0),
            user_id: Some(owner),
            ..GiftChanges::default()
        };
        let doc = changes.to_set_document();
        assert_eq!(doc.get_str("storeNumber").unwrap(), "7-11 #042");
        assert_eq!(doc.get_f64("amount").unwrap(), 500.0);
        assert_eq!(doc.get_object_id("userId").unwrap(), owner);
    }

    #[test]
    fn test_apply_overwrites_image_and_keeps_rest() {
        let mut gift = Gift {
            name: Some("Mug".to_string()),
            image: "/uploads/1-mug.png".to_string(),
            ..Gift::default()
        };
        let changes = GiftChanges { image: Some(String::new()), amount: Some(300.0), ..GiftChanges::default() };
        changes.apply(&mut gift);
        assert_eq!(gift.name.as_deref(), Some("Mug"));
        assert_eq!(gift.image, "");
        assert_eq!(gift.amount, Some(300.0));
    }
}
