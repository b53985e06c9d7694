use crate::dto::render_timestamp;
use crate::model::announcement::Announcement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: Option<String>,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(announcement: Announcement) -> Self {
        AnnouncementResponse {
            id: announcement.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: announcement.title,
            content: announcement.content,
            created_at: announcement.created_at.map(render_timestamp),
        }
    }
}
