use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod db;

pub static PAYMENT_COLLECTION_NAME: &str = "payments";

/// Record of a completed payment as reported by the client. Immutable once
/// stored; the processor is never asked to confirm it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub transaction_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub date: DateTime<Utc>,
}

pub mod filter {
    use bson::{doc, Document};

    #[inline]
    pub fn by_email(email: impl AsRef<str>) -> Document {
        doc! { "email": email.as_ref() }
    }
}
