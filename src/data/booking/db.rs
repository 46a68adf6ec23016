use bson::oid::ObjectId;
use bson::Document;
use mongodb::Database;
use rocket::futures::StreamExt;

use crate::data::{DeletedResponse, InsertedResponse};
use crate::resp::problem::Problem;

use super::filter;
use super::{Booking, BOOKING_COLLECTION_NAME};

#[allow(async_fn_in_trait)]
pub trait BookingDbExt {
    async fn create_booking(&self, booking: Booking) -> Result<InsertedResponse, Problem>;

    async fn list_bookings_for(&self, email: &str) -> Result<Vec<Booking>, Problem>;

    async fn find_booking(&self, id: ObjectId) -> Result<Option<Booking>, Problem>;

    async fn delete_booking(&self, id: ObjectId) -> Result<DeletedResponse, Problem>;
}

impl BookingDbExt for Database {
    async fn create_booking(&self, booking: Booking) -> Result<InsertedResponse, Problem> {
        self.collection(BOOKING_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&booking).expect("Booking must be serializable to BSON"),
                None,
            )
            .await
            .map(InsertedResponse::from)
            .map_err(Problem::from)
    }

    async fn list_bookings_for(&self, email: &str) -> Result<Vec<Booking>, Problem> {
        let mut documents = self
            .collection::<Booking>(BOOKING_COLLECTION_NAME)
            .find(filter::by_email(email), None)
            .await
            .map_err(Problem::from)?;

        let mut bookings = vec![];
        while let Some(booking) = documents.next().await {
            match booking {
                Ok(booking) => bookings.push(booking),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Booking document.")
                }
            }
        }

        Ok(bookings)
    }

    async fn find_booking(&self, id: ObjectId) -> Result<Option<Booking>, Problem> {
        self.collection(BOOKING_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn delete_booking(&self, id: ObjectId) -> Result<DeletedResponse, Problem> {
        self.collection::<Document>(BOOKING_COLLECTION_NAME)
            .delete_one(filter::by_id(id), None)
            .await
            .map(DeletedResponse::from)
            .map_err(Problem::from)
    }
}
