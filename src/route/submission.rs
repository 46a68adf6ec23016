use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::parse_object_id;
use crate::data::submission::db::SubmissionDbExt;
use crate::data::submission::{
    Submission, SubmissionCreate, SubmissionEdit, SubmissionFeedback, SubmissionStatus,
};
use crate::data::{InsertedResponse, UpdatedResponse};
use crate::resp::guard::{forbidden_problem, AdminUser, StaffUser};
use crate::resp::jwt::UserClaims;
use crate::resp::problem::Problem;

/// Submit a class for review. New submissions always start Pending.
#[utoipa::path(
    request_body = SubmissionCreate,
    responses((status = 200, body = InsertedResponse)),
    security(("jwt" = []))
)]
#[post("/addedClasses", format = "application/json", data = "<submission>")]
#[tracing::instrument]
pub async fn submission_create(
    submission: Json<SubmissionCreate>,
    _auth: UserClaims,
    db: &State<Database>,
) -> Result<Json<InsertedResponse>, Problem> {
    Ok(Json(
        db.create_submission(Submission::from(submission.into_inner()))
            .await?,
    ))
}

/// Review queue: everything for admins, or one submitter's slice.
#[utoipa::path(
    responses((status = 200, body = Vec<Submission>)),
    security(("jwt" = []))
)]
#[get("/addedClasses?<email>")]
#[tracing::instrument]
pub async fn submission_list(
    email: Option<&str>,
    _staff: StaffUser,
    db: &State<Database>,
) -> Result<Json<Vec<Submission>>, Problem> {
    Ok(Json(db.list_submissions(email).await?))
}

/// Overwrite a submission's editable fields. Only the submitter may edit.
#[utoipa::path(
    request_body = SubmissionEdit,
    responses(
        (status = 200, body = UpdatedResponse),
        (status = 403, description = "Submission belongs to someone else", body = Problem),
    ),
    security(("jwt" = []))
)]
#[put("/addedClasses/<id>", format = "application/json", data = "<edit>")]
#[tracing::instrument]
pub async fn submission_edit(
    id: &str,
    edit: Json<SubmissionEdit>,
    auth: UserClaims,
    db: &State<Database>,
) -> Result<Json<UpdatedResponse>, Problem> {
    let id = parse_object_id(id)?;

    let submission = match db.find_submission(id).await? {
        Some(it) => it,
        None => {
            return Ok(Json(UpdatedResponse {
                matched_count: 0,
                modified_count: 0,
            }))
        }
    };

    if submission.submitter != auth.email {
        return Err(forbidden_problem("Submission is not owned by the caller."));
    }

    Ok(Json(db.update_submission_fields(id, &edit).await?))
}

/// Resolve a review: the literal "Approve" approves, anything else denies.
/// Promotion of an approved submission into the catalog is a separate call.
#[utoipa::path(
    responses((status = 200, body = UpdatedResponse)),
    security(("jwt" = []))
)]
#[patch("/addedClasses/<status>/<id>")]
#[tracing::instrument]
pub async fn submission_set_status(
    status: &str,
    id: &str,
    _admin: AdminUser,
    db: &State<Database>,
) -> Result<Json<UpdatedResponse>, Problem> {
    let id = parse_object_id(id)?;

    Ok(Json(
        db.set_submission_status(id, SubmissionStatus::from_action(status))
            .await?,
    ))
}

/// Attach reviewer feedback, independent of status.
#[utoipa::path(
    request_body = SubmissionFeedback,
    responses((status = 200, body = UpdatedResponse)),
    security(("jwt" = []))
)]
#[patch("/addedClasses/<id>", format = "application/json", data = "<feedback>")]
#[tracing::instrument]
pub async fn submission_feedback(
    id: &str,
    feedback: Json<SubmissionFeedback>,
    _admin: AdminUser,
    db: &State<Database>,
) -> Result<Json<UpdatedResponse>, Problem> {
    let id = parse_object_id(id)?;

    Ok(Json(
        db.set_submission_feedback(id, &feedback.feedback).await?,
    ))
}

///////////////////////
//       TESTS
///////////////////////

#[cfg(test)]
mod submission_endpoints {
    use bson::Document;
    use mongodb::Database;
    use rocket::http::{ContentType, Status};
    use serde_json::json;

    use crate::config::Config;
    use crate::data::class::{
        filter as class_filter, PublishedClass, CLASS_COLLECTION_NAME,
    };
    use crate::data::parse_object_id;
    use crate::data::submission::db::SubmissionDbExt;
    use crate::data::submission::{
        filter, Submission, SubmissionCreate, SubmissionStatus, SUBMISSION_COLLECTION_NAME,
    };
    use crate::data::InsertedResponse;
    use crate::role::Role;
    use crate::route::testutil::{bearer, client, remove_user, seed_user};

    async fn seed_submission(db: &Database, submitter: &str, name: &str) -> String {
        let inserted = db
            .create_submission(Submission::from(SubmissionCreate {
                submitter: submitter.to_string(),
                name: name.to_string(),
                price: 40.0,
                available_seats: 12,
            }))
            .await
            .expect("unable to seed submission");
        inserted.inserted_id
    }

    async fn remove_submission(db: &Database, id: &str) {
        db.collection::<Document>(SUBMISSION_COLLECTION_NAME)
            .delete_one(filter::by_id(parse_object_id(id).unwrap()), None)
            .await
            .expect("unable to delete test submission");
    }

    #[rocket::async_test]
    async fn approved_submissions_promote_into_the_catalog() {
        let client = client().await;
        let db: &Database = client.rocket().state().unwrap();
        let config: &Config = client.rocket().state().unwrap();

        let instructor = "workflow_instructor@example.com";
        let admin = "workflow_admin@example.com";
        seed_user(db, instructor, Role::Instructor).await;
        seed_user(db, admin, Role::Admin).await;

        // instructor submits; the new submission is Pending
        let response = client
            .post("/addedClasses")
            .header(ContentType::JSON)
            .header(bearer(config, instructor))
            .body(
                json!({
                    "submitter": instructor,
                    "name": "Figure Drawing",
                    "price": 40.0,
                    "available_seats": 12,
                })
                .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");
        let inserted: InsertedResponse =
            response.into_json().await.expect("invalid response json");
        let submission_id = inserted.inserted_id;

        let submission = db
            .find_submission(parse_object_id(&submission_id).unwrap())
            .await
            .unwrap()
            .expect("submission present");
        assert_eq!(submission.status, SubmissionStatus::Pending);

        // admin approves
        let response = client
            .patch(format!("/addedClasses/Approve/{}", submission_id))
            .header(bearer(config, admin))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");

        let submission = db
            .find_submission(parse_object_id(&submission_id).unwrap())
            .await
            .unwrap()
            .expect("submission present");
        assert_eq!(submission.status, SubmissionStatus::Approve);

        // the admin client promotes the approved submission by copy
        let response = client
            .post("/classes")
            .header(ContentType::JSON)
            .body(
                json!({
                    "name": submission.name,
                    "price": submission.price,
                    "instructor": "Workflow Instructor",
                    "instructor_email": submission.submitter,
                    "available_seats": submission.available_seats,
                })
                .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");
        let published: InsertedResponse =
            response.into_json().await.expect("invalid response json");

        // separate document, separate id; the submission stays behind
        assert_ne!(published.inserted_id, submission_id);
        let class: Option<PublishedClass> = db
            .collection(CLASS_COLLECTION_NAME)
            .find_one(
                class_filter::by_id(parse_object_id(&published.inserted_id).unwrap()),
                None,
            )
            .await
            .unwrap();
        assert!(class.is_some(), "published class must exist");
        assert!(db
            .find_submission(parse_object_id(&submission_id).unwrap())
            .await
            .unwrap()
            .is_some());

        db.collection::<Document>(CLASS_COLLECTION_NAME)
            .delete_one(
                class_filter::by_id(parse_object_id(&published.inserted_id).unwrap()),
                None,
            )
            .await
            .unwrap();
        remove_submission(db, &submission_id).await;
        remove_user(db, instructor).await;
        remove_user(db, admin).await;
    }

    #[rocket::async_test]
    async fn any_other_action_literal_denies() {
        let client = client().await;
        let db: &Database = client.rocket().state().unwrap();
        let config: &Config = client.rocket().state().unwrap();

        let admin = "deny_admin@example.com";
        seed_user(db, admin, Role::Admin).await;
        let id = seed_submission(db, "deny_submitter@example.com", "Pottery 101").await;

        let response = client
            .patch(format!("/addedClasses/approve/{}", id))
            .header(bearer(config, admin))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");

        let submission = db
            .find_submission(parse_object_id(&id).unwrap())
            .await
            .unwrap()
            .expect("submission present");
        assert_eq!(
            submission.status,
            SubmissionStatus::Deny,
            "lowercase 'approve' must deny"
        );

        remove_submission(db, &id).await;
        remove_user(db, admin).await;
    }

    #[rocket::async_test]
    async fn feedback_attaches_without_touching_status() {
        let client = client().await;
        let db: &Database = client.rocket().state().unwrap();
        let config: &Config = client.rocket().state().unwrap();

        let admin = "feedback_admin@example.com";
        seed_user(db, admin, Role::Admin).await;
        let id = seed_submission(db, "feedback_submitter@example.com", "Origami").await;

        let response = client
            .patch(format!("/addedClasses/{}", id))
            .header(ContentType::JSON)
            .header(bearer(config, admin))
            .body(r#"{"feedback":"Needs a longer description."}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");

        let submission = db
            .find_submission(parse_object_id(&id).unwrap())
            .await
            .unwrap()
            .expect("submission present");
        assert_eq!(
            submission.feedback.as_deref(),
            Some("Needs a longer description.")
        );
        assert_eq!(submission.status, SubmissionStatus::Pending);

        remove_submission(db, &id).await;
        remove_user(db, admin).await;
    }

    #[rocket::async_test]
    async fn only_the_submitter_may_edit() {
        let client = client().await;
        let db: &Database = client.rocket().state().unwrap();
        let config: &Config = client.rocket().state().unwrap();

        let owner = "edit_owner@example.com";
        let intruder = "edit_intruder@example.com";
        let id = seed_submission(db, owner, "Advanced Weaving").await;

        let edit_body = r#"{"name":"Advanced Weaving II","price":55.0,"available_seats":8}"#;

        let response = client
            .put(format!("/addedClasses/{}", id))
            .header(ContentType::JSON)
            .header(bearer(config, intruder))
            .body(edit_body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);

        let response = client
            .put(format!("/addedClasses/{}", id))
            .header(ContentType::JSON)
            .header(bearer(config, owner))
            .body(edit_body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "an ok response");

        let submission = db
            .find_submission(parse_object_id(&id).unwrap())
            .await
            .unwrap()
            .expect("submission present");
        assert_eq!(submission.name, "Advanced Weaving II");
        assert_eq!(submission.available_seats, 8);

        remove_submission(db, &id).await;
    }

    #[rocket::async_test]
    async fn listing_requires_staff() {
        let client = client().await;
        let db: &Database = client.rocket().state().unwrap();
        let config: &Config = client.rocket().state().unwrap();

        let student = "queue_student@example.com";
        seed_user(db, student, Role::Unset).await;

        let response = client
            .get("/addedClasses")
            .header(bearer(config, student))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);

        remove_user(db, student).await;
    }
}
