use rocket::http::Status;
use rocket::{Build, Rocket, Route};

pub mod booking;
pub mod class;
pub mod payment;
pub mod submission;
pub mod users;

#[cfg(test)]
pub mod testutil;

use booking::*;
use class::*;
use payment::*;
use submission::*;
use users::*;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    data::{
        booking::Booking,
        class::{EnrollmentUpdate, PublishedClass},
        payment::Payment,
        submission::{Submission, SubmissionCreate, SubmissionEdit, SubmissionFeedback},
        user::{db::UserRegistration, User},
        DeletedResponse, InsertedResponse, UpdatedResponse,
    },
    resp::{jwt::doc::JWTAuth, problem::Problem},
    role::Role,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        token_issue,
        user_create,
        user_list,
        user_set_role,
        instructor_list,
        class_list,
        class_create,
        class_enroll,
        submission_create,
        submission_list,
        submission_edit,
        submission_set_status,
        submission_feedback,
        booking_create,
        booking_list,
        payment_intent_create,
        payment_create,
        payment_list
    ),
    components(schemas(
        Role,
        User,
        UserRegistration,
        TokenRequest,
        TokenResponse,
        PublishedClass,
        EnrollmentUpdate,
        Submission,
        SubmissionCreate,
        SubmissionEdit,
        SubmissionFeedback,
        Booking,
        Payment,
        PaymentIntentRequest,
        PaymentIntentResponse,
        InsertedResponse,
        UpdatedResponse,
        DeletedResponse,
        Problem
    )),
    modifiers(&JWTAuth)
)]
pub struct ApiDoc;

/// Liveness probe.
#[get("/")]
pub fn liveness() -> &'static str {
    "LessonLink is running"
}

pub fn api() -> Vec<Route> {
    routes![
        liveness,
        token_issue,
        user_create,
        user_list,
        user_set_role,
        user_role_check,
        instructor_list,
        class_list,
        class_create,
        class_enroll,
        submission_create,
        submission_list,
        submission_edit,
        submission_set_status,
        submission_feedback,
        booking_create,
        booking_list,
        booking_delete,
        payment_intent_create,
        payment_create,
        payment_list
    ]
}

#[catch(401)]
fn unauthorized() -> Problem {
    Problem::new(Status::Unauthorized, "Request is not authorized.")
}

#[catch(403)]
fn forbidden() -> Problem {
    Problem::new(Status::Forbidden, "Insufficient permissions.")
}

#[catch(404)]
fn not_found() -> Problem {
    Problem::new(Status::NotFound, "Resource not found.")
}

#[catch(422)]
fn unprocessable() -> Problem {
    Problem::new(Status::UnprocessableEntity, "Request body was malformed.")
}

#[catch(500)]
fn internal_error() -> Problem {
    Problem::new(Status::InternalServerError, "Internal server error.")
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api())
        .mount(
            "/",
            SwaggerUi::new("/swagger/<_..>").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .register(
            "/",
            catchers![
                unauthorized,
                forbidden,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}
