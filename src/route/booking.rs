use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::booking::db::BookingDbExt;
use crate::data::booking::Booking;
use crate::data::parse_object_id;
use crate::data::{DeletedResponse, InsertedResponse};
use crate::resp::guard::forbidden_problem;
use crate::resp::jwt::UserClaims;
use crate::resp::problem::Problem;

/// Book a class. Repeat bookings of the same class are not deduplicated, and
/// catalog seat counts are untouched here.
#[utoipa::path(request_body = Booking, responses((status = 200, body = InsertedResponse)))]
#[post("/bookingclasses", format = "application/json", data = "<booking>")]
#[tracing::instrument]
pub async fn booking_create(
    booking: Json<Booking>,
    db: &State<Database>,
) -> Result<Json<InsertedResponse>, Problem> {
    Ok(Json(db.create_booking(booking.into_inner()).await?))
}

/// A user's own bookings. Asking for someone else's is forbidden; asking for
/// nobody's is an empty list.
#[utoipa::path(
    responses(
        (status = 200, body = Vec<Booking>),
        (status = 403, description = "Query email differs from the token", body = Problem),
    ),
    security(("jwt" = []))
)]
#[get("/bookingclasses?<email>")]
#[tracing::instrument]
pub async fn booking_list(
    email: Option<&str>,
    auth: UserClaims,
    db: &State<Database>,
) -> Result<Json<Vec<Booking>>, Problem> {
    let email = match email {
        Some(it) => it,
        None => return Ok(Json(vec![])),
    };

    if email != auth.email {
        return Err(forbidden_problem(
            "Bookings can only be listed by their owner.",
        ));
    }

    Ok(Json(db.list_bookings_for(email).await?))
}

/// Cancel a booking by id. Unknown ids delete nothing and still succeed.
#[delete("/bookingclasses?<id>")]
#[tracing::instrument]
pub async fn booking_delete(
    id: &str,
    auth: UserClaims,
    db: &State<Database>,
) -> Result<Json<DeletedResponse>, Problem> {
    let id = parse_object_id(id)?;

    let booking = match db.find_booking(id).await? {
        Some(it) => it,
        None => return Ok(Json(DeletedResponse { deleted_count: 0 })),
    };

    if booking.email != auth.email {
        return Err(forbidden_problem("Booking is not owned by the caller."));
    }

    Ok(Json(db.delete_booking(id).await?))
}

///////////////////////
//       TESTS
///////////////////////
