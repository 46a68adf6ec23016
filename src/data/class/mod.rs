use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod db;

pub static CLASS_COLLECTION_NAME: &str = "classes";

/// A class visible in the public catalog. Created by promoting an approved
/// submission; the submission document persists separately.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishedClass {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub instructor: String,
    pub instructor_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub available_seats: i64,
    #[serde(default)]
    pub total_enroll: i64,
}

/// Enrollment bump payload: the seat count the booking client observed when
/// the student picked the class.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnrollmentUpdate {
    pub available_seats: i64,
}

pub mod filter {
    use bson::oid::ObjectId;
    use bson::{doc, Document};

    #[inline]
    pub fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }
}
