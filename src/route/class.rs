use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::class::db::ClassDbExt;
use crate::data::class::{EnrollmentUpdate, PublishedClass};
use crate::data::parse_object_id;
use crate::data::{InsertedResponse, UpdatedResponse};
use crate::resp::problem::Problem;

/// All published classes, most enrolled first.
#[utoipa::path(
    responses(
        (status = 200, description = "Catalog sorted by total enrollment", body = Vec<PublishedClass>),
    )
)]
#[get("/classes")]
#[tracing::instrument]
pub async fn class_list(db: &State<Database>) -> Result<Json<Vec<PublishedClass>>, Problem> {
    Ok(Json(db.list_classes().await?))
}

/// Publish a class into the catalog. Promoting an approved submission is the
/// caller's job; this endpoint only inserts the copy.
#[utoipa::path(request_body = PublishedClass, responses((status = 200, body = InsertedResponse)))]
#[post("/classes", format = "application/json", data = "<class>")]
#[tracing::instrument]
pub async fn class_create(
    class: Json<PublishedClass>,
    db: &State<Database>,
) -> Result<Json<InsertedResponse>, Problem> {
    Ok(Json(db.publish_class(class.into_inner()).await?))
}

/// Record one enrollment when the caller saw open seats.
#[utoipa::path(request_body = EnrollmentUpdate, responses((status = 200, body = UpdatedResponse)))]
#[patch("/classes/<id>", format = "application/json", data = "<update>")]
#[tracing::instrument]
pub async fn class_enroll(
    id: &str,
    update: Json<EnrollmentUpdate>,
    db: &State<Database>,
) -> Result<Json<UpdatedResponse>, Problem> {
    let id = parse_object_id(id)?;

    Ok(Json(db.record_enrollment(id, update.available_seats).await?))
}

///////////////////////
//       TESTS
///////////////////////
