use bson::oid::ObjectId;
use bson::{doc, Document};
use mongodb::Database;
use rocket::futures::StreamExt;

use crate::data::{InsertedResponse, UpdatedResponse};
use crate::resp::problem::Problem;

use super::filter;
use super::{Submission, SubmissionEdit, SubmissionStatus, SUBMISSION_COLLECTION_NAME};

#[allow(async_fn_in_trait)]
pub trait SubmissionDbExt {
    async fn create_submission(
        &self,
        submission: Submission,
    ) -> Result<InsertedResponse, Problem>;

    /// All submissions, or only one submitter's when an email is given.
    async fn list_submissions(
        &self,
        submitter: Option<&str>,
    ) -> Result<Vec<Submission>, Problem>;

    async fn find_submission(&self, id: ObjectId) -> Result<Option<Submission>, Problem>;

    async fn update_submission_fields(
        &self,
        id: ObjectId,
        edit: &SubmissionEdit,
    ) -> Result<UpdatedResponse, Problem>;

    async fn set_submission_status(
        &self,
        id: ObjectId,
        status: SubmissionStatus,
    ) -> Result<UpdatedResponse, Problem>;

    async fn set_submission_feedback(
        &self,
        id: ObjectId,
        feedback: &str,
    ) -> Result<UpdatedResponse, Problem>;
}

impl SubmissionDbExt for Database {
    async fn create_submission(
        &self,
        submission: Submission,
    ) -> Result<InsertedResponse, Problem> {
        self.collection(SUBMISSION_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&submission)
                    .expect("Submission must be serializable to BSON"),
                None,
            )
            .await
            .map(InsertedResponse::from)
            .map_err(Problem::from)
    }

    async fn list_submissions(
        &self,
        submitter: Option<&str>,
    ) -> Result<Vec<Submission>, Problem> {
        let filter = submitter.map(filter::by_submitter);

        let mut documents = self
            .collection::<Submission>(SUBMISSION_COLLECTION_NAME)
            .find(filter, None)
            .await
            .map_err(Problem::from)?;

        let mut submissions = vec![];
        while let Some(submission) = documents.next().await {
            match submission {
                Ok(submission) => submissions.push(submission),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Submission document.")
                }
            }
        }

        Ok(submissions)
    }

    async fn find_submission(&self, id: ObjectId) -> Result<Option<Submission>, Problem> {
        self.collection(SUBMISSION_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn update_submission_fields(
        &self,
        id: ObjectId,
        edit: &SubmissionEdit,
    ) -> Result<UpdatedResponse, Problem> {
        self.collection::<Document>(SUBMISSION_COLLECTION_NAME)
            .update_one(
                filter::by_id(id),
                doc! { "$set": {
                    "name": edit.name.as_str(),
                    "price": edit.price,
                    "available_seats": edit.available_seats,
                } },
                None,
            )
            .await
            .map(UpdatedResponse::from)
            .map_err(Problem::from)
    }

    async fn set_submission_status(
        &self,
        id: ObjectId,
        status: SubmissionStatus,
    ) -> Result<UpdatedResponse, Problem> {
        self.collection::<Document>(SUBMISSION_COLLECTION_NAME)
            .update_one(
                filter::by_id(id),
                doc! { "$set": { "status": status.as_str() } },
                None,
            )
            .await
            .map(UpdatedResponse::from)
            .map_err(Problem::from)
    }

    async fn set_submission_feedback(
        &self,
        id: ObjectId,
        feedback: &str,
    ) -> Result<UpdatedResponse, Problem> {
        self.collection::<Document>(SUBMISSION_COLLECTION_NAME)
            .update_one(
                filter::by_id(id),
                doc! { "$set": { "feedback": feedback } },
                None,
            )
            .await
            .map(UpdatedResponse::from)
            .map_err(Problem::from)
    }
}
