use crate::dto::render_timestamp;
use crate::model::gift::{Gift, GiftChanges};
use bson::oid::ObjectId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file part received with a gift form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Descriptive gift fields as sent in a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiftFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub mode: Option<String>,
    pub store_number: Option<String>,
    pub phone_number: Option<String>,
    pub amount: Option<f64>,
    pub url: Option<String>,
    pub user_id: Option<ObjectId>,
}

impl GiftFields {
    /// Record one named form value. Unknown names are ignored; an empty
    /// `amount` or `userId` counts as absent.
    pub fn set(&mut self, name: &str, value: String) -> Result<(), String> {
        match name {
            "name" => self.name = Some(value),
            "description" => self.description = Some(value),
            "level" => self.level = Some(value),
            "mode" => self.mode = Some(value),
            "storeNumber" => self.store_number = Some(value),
            "phoneNumber" => self.phone_number = Some(value),
            "url" => self.url = Some(value),
            "amount" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    let amount = trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|a| a.is_finite())
                        .ok_or_else(|| format!("Invalid amount: {}", value))?;
                    self.amount = Some(amount);
                }
            }
            "userId" => {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    let id = ObjectId::parse_str(trimmed).map_err(|_| format!("Invalid userId: {}", value))?;
                    self.user_id = Some(id);
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn into_gift(self, image: String) -> Gift {
        Gift {
            id: None,
            name: self.name,
            description: self.description,
            level: self.level,
            mode: self.mode,
            store_number: self.store_number,
            phone_number: self.phone_number,
            amount: self.amount,
            url: self.url,
            image,
            user_id: self.user_id,
            created_at: None,
            updated_at: None,
        }
    }

    /// `image: None` leaves the stored image path as it is.
    pub fn into_changes(self, image: Option<String>) -> GiftChanges {
        GiftChanges {
            name: self.name,
            description: self.description,
            level: self.level,
            mode: self.mode,
            store_number: self.store_number,
            phone_number: self.phone_number,
            amount: self.amount,
            url: self.url,
            image,
            user_id: self.user_id,
        }
    }
}

/// Parsed body of `POST /gifts` and `PUT /gifts/{id}`.
#[derive(Debug, Clone, Default)]
pub struct GiftForm {
    pub fields: GiftFields,
    pub image: Option<UploadedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftResponse {
    #[serde(rename = "_id")]
    pub id: String,
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
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Gift> for GiftResponse {
    fn from(gift: Gift) -> Self {
        GiftResponse {
            id: gift.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: gift.name,
            description: gift.description,
            level: gift.level,
            mode: gift.mode,
            store_number: gift.store_number,
            phone_number: gift.phone_number,
            amount: gift.amount,
            url: gift.url,
            image: gift.image,
            user_id: gift.user_id.map(|id| id.to_hex()),
            created_at: gift.created_at.map(render_timestamp),
            updated_at: gift.updated_at.map(render_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_parses_amount_and_owner() {
        let owner = ObjectId::new();
        let mut fields = GiftFields::default();
        fields.set("amount", " 250.5 ".to_string()).unwrap();
        fields.set("userId", owner.to_hex()).unwrap();
        fields.set("storeNumber", "042".to_string()).unwrap();
        assert_eq!(fields.amount, Some(250.5));
        assert_eq!(fields.user_id, Some(owner));
        assert_eq!(fields.store_number.as_deref(), Some("042"));
    }

    #[test]
    fn test_set_treats_blank_numbers_as_absent() {
        let mut fields = GiftFields::default();
        fields.set("amount", "".to_string()).unwrap();
        fields.set("userId", "  ".to_string()).unwrap();
        assert_eq!(fields, GiftFields::default());
    }

    #[test]
    fn test_set_rejects_malformed_values() {
        let mut fields = GiftFields::default();
        assert!(fields.set("amount", "lots".to_string()).is_err());
        assert!(fields.set("userId", "not-an-id".to_string()).is_err());
    }

    #[test]
    fn test_set_ignores_unknown_fields() {
        let mut fields = GiftFields::default();
        fields.set("image", "/etc/passwd".to_string()).unwrap();
        fields.set("color", "red".to_string()).unwrap();
        assert_eq!(fields, GiftFields::default());
    }
}
