use bson::doc;
use mongodb::options::FindOptions;
use mongodb::Database;
use rocket::futures::StreamExt;

use crate::data::InsertedResponse;
use crate::resp::problem::Problem;

use super::filter;
use super::{Payment, PAYMENT_COLLECTION_NAME};

#[allow(async_fn_in_trait)]
pub trait PaymentDbExt {
    async fn record_payment(&self, payment: Payment) -> Result<InsertedResponse, Problem>;

    /// One user's payments, newest first.
    async fn list_payments_for(&self, email: &str) -> Result<Vec<Payment>, Problem>;
}

impl PaymentDbExt for Database {
    async fn record_payment(&self, payment: Payment) -> Result<InsertedResponse, Problem> {
        self.collection(PAYMENT_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&payment).expect("Payment must be serializable to BSON"),
                None,
            )
            .await
            .map(InsertedResponse::from)
            .map_err(Problem::from)
    }

    async fn list_payments_for(&self, email: &str) -> Result<Vec<Payment>, Problem> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();

        let mut documents = self
            .collection::<Payment>(PAYMENT_COLLECTION_NAME)
            .find(filter::by_email(email), options)
            .await
            .map_err(Problem::from)?;

        let mut payments = vec![];
        while let Some(payment) = documents.next().await {
            match payment {
                Ok(payment) => payments.push(payment),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Payment document.")
                }
            }
        }

        Ok(payments)
    }
}
