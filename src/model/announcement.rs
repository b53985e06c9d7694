use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<bson::DateTime>,
}

/// Title and content as sent by clients, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnouncementFields {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl AnnouncementFields {
    pub fn to_set_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(title) = &self.title {
            doc.insert("title", title.as_str());
        }
        if let Some(content) = &self.content {
            doc.insert("content", content.as_str());
        }
        doc
    }

    pub fn apply(&self, announcement: &mut Announcement) {
        if let Some(title) = &self.title {
            announcement.title = Some(title.clone());
        }
        if let Some(content) = &self.content {
            announcement.content = Some(content.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_decodes_document_with_date_created_at() {
        let id = ObjectId::new();
        let created = bson::DateTime::from_millis(1_703_376_000_000);
        let doc = doc! { "_id": id, "title": "t", "content": "c", "createdAt": created, "__v": 0 };
        let announcement: Announcement = bson::from_document(doc).unwrap();
        assert_eq!(announcement.id, Some(id));
        assert_eq!(announcement.title.as_deref(), Some("t"));
        assert_eq!(announcement.created_at, Some(created));
    }

    #[test]
    fn test_created_at_is_written_as_date() {
        let announcement = Announcement {
            title: Some("t".to_string()),
            created_at: Some(bson::DateTime::now()),
            ..Announcement::default()
        };
        let doc = bson::to_document(&announcement).unwrap();
        assert!(doc.get_datetime("createdAt").is_ok());
        assert!(!doc.contains_key("content"));
    }

    #[test]
    fn test_set_document_skips_absent_fields() {
        let fields = AnnouncementFields { content: Some("new".to_string()), ..AnnouncementFields::default() };
        let doc = fields.to_set_document();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_str("content").unwrap(), "new");
    }
}
