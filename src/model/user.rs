use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    // Fields a client left out stay absent in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Stored and compared as given; no hashing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub is_admin: bool,
}

/// Partial overwrite of a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.to_set_document().is_empty()
    }

    /// Body of the `$set` operator for this change set.
    pub fn to_set_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(name) = &self.name {
            doc.insert("name", name.as_str());
        }
        if let Some(email) = &self.email {
            doc.insert("email", email.as_str());
        }
        if let Some(password) = &self.password {
            doc.insert("password", password.as_str());
        }
        if let Some(phone_number) = &self.phone_number {
            doc.insert("phoneNumber", phone_number.as_str());
        }
        if let Some(is_admin) = self.is_admin {
            doc.insert("isAdmin", is_admin);
        }
        doc
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(password) = &self.password {
            user.password = Some(password.clone());
        }
        if let Some(phone_number) = &self.phone_number {
            user.phone_number = Some(phone_number.clone());
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
    }
}
