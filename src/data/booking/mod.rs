use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod db;

pub static BOOKING_COLLECTION_NAME: &str = "booked_classes";

/// A student's class selection, snapshotting the class details at booking
/// time. Nothing deduplicates repeat bookings of the same class, and deleting
/// a booking does not restore catalog seats.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub class_id: String,
    pub class_name: String,
    pub price: f64,
    pub instructor: String,
}

pub mod filter {
    use bson::oid::ObjectId;
    use bson::{doc, Document};

    #[inline]
    pub fn by_id(id: ObjectId) -> Document {
        doc! { "_id": id }
    }

    #[inline]
    pub fn by_email(email: impl AsRef<str>) -> Document {
        doc! { "email": email.as_ref() }
    }
}
