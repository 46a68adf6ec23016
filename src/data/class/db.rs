use bson::oid::ObjectId;
use bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::Database;
use rocket::futures::StreamExt;

use crate::data::{InsertedResponse, UpdatedResponse};
use crate::resp::problem::Problem;

use super::filter;
use super::{PublishedClass, CLASS_COLLECTION_NAME};

/// Builds the paired counter update for one enrollment. Both counters move
/// together or not at all: a non-positive observed seat count produces a
/// zero-increment write rather than an error.
pub fn enrollment_update(seen_seats: i64) -> Document {
    let (enroll_inc, seats_inc) = if seen_seats > 0 { (1, -1) } else { (0, 0) };

    doc! { "$inc": { "total_enroll": enroll_inc, "available_seats": seats_inc } }
}

#[allow(async_fn_in_trait)]
pub trait ClassDbExt {
    async fn list_classes(&self) -> Result<Vec<PublishedClass>, Problem>;

    async fn publish_class(&self, class: PublishedClass) -> Result<InsertedResponse, Problem>;

    async fn record_enrollment(
        &self,
        id: ObjectId,
        seen_seats: i64,
    ) -> Result<UpdatedResponse, Problem>;
}

impl ClassDbExt for Database {
    /// Most popular first. No paging.
    async fn list_classes(&self) -> Result<Vec<PublishedClass>, Problem> {
        let options = FindOptions::builder()
            .sort(doc! { "total_enroll": -1 })
            .build();

        let mut documents = self
            .collection::<PublishedClass>(CLASS_COLLECTION_NAME)
            .find(None, options)
            .await
            .map_err(Problem::from)?;

        let mut classes = vec![];
        while let Some(class) = documents.next().await {
            match class {
                Ok(class) => classes.push(class),
                Err(_) => {
                    tracing::warn!("Unable to deserialize PublishedClass document.")
                }
            }
        }

        Ok(classes)
    }

    async fn publish_class(&self, class: PublishedClass) -> Result<InsertedResponse, Problem> {
        self.collection(CLASS_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&class).expect("PublishedClass must be serializable to BSON"),
                None,
            )
            .await
            .map(InsertedResponse::from)
            .map_err(Problem::from)
    }

    async fn record_enrollment(
        &self,
        id: ObjectId,
        seen_seats: i64,
    ) -> Result<UpdatedResponse, Problem> {
        self.collection::<Document>(CLASS_COLLECTION_NAME)
            .update_one(filter::by_id(id), enrollment_update(seen_seats), None)
            .await
            .map(UpdatedResponse::from)
            .map_err(Problem::from)
    }
}
