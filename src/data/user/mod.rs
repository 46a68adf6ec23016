use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

pub mod db;

pub static USER_COLLECTION_NAME: &str = "users";

/// Directory record keyed by email. Registration is idempotent per email and
/// records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// Enrollment counter driving the instructor listing order. Stays 0 for
    /// everyone without instructor duties.
    #[serde(default)]
    pub students: i64,
}

impl User {
    pub fn new(email: impl ToString, name: impl ToString) -> User {
        User {
            id: None,
            email: email.to_string(),
            name: name.to_string(),
            photo_url: None,
            role: Role::Unset,
            students: 0,
        }
    }
}

pub mod filter {
    use bson::oid::ObjectId;
    use bson::{doc, Document};

    use crate::role::Role;

    #[inline]
    pub fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    #[inline]
    pub fn by_email(email: impl AsRef<str>) -> Document {
        doc! { "email": email.as_ref() }
    }

    #[inline]
    pub fn by_role(role: Role) -> Document {
        doc! { "role": role.as_str() }
    }
}
