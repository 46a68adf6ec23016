use mongodb::Database;
use rocket::http::Status;
use rocket::request::{self, FromRequest, Request};

use crate::data::user::db::UserDbExt;
use crate::resp::jwt::{auth_problem, UserClaims};
use crate::resp::problem::Problem;
use crate::role::Role;

pub fn forbidden_problem(detail: impl ToString) -> Problem {
    Problem::new(Status::Forbidden, "Insufficient permissions.")
        .detail(detail)
        .clone()
}

/// Authenticates the request, then resolves the caller's directory role with
/// a single lookup. Callers without a directory record count as [`Role::Unset`].
async fn lookup_role(req: &Request<'_>) -> Result<(UserClaims, Role), (Status, Problem)> {
    let claims = match req.guard::<UserClaims>().await {
        request::Outcome::Success(it) => it,
        request::Outcome::Error((status, e)) => return Err((status, e)),
        request::Outcome::Forward(_) => {
            return Err((
                Status::Unauthorized,
                auth_problem("Unable to authenticate request."),
            ))
        }
    };

    let db: &Database = req
        .rocket()
        .state()
        .expect("Database handle is managed at startup");

    let role = db
        .find_user_by_email(&claims.email)
        .await
        .map_err(|e| (Status::InternalServerError, e))?
        .map(|user| user.role)
        .unwrap_or_default();

    Ok((claims, role))
}

/// Request gate for admin-only routes.
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserClaims);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = Problem;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match lookup_role(req).await {
            Ok((claims, Role::Admin)) => request::Outcome::Success(AdminUser(claims)),
            Ok(_) => request::Outcome::Error((
                Status::Forbidden,
                forbidden_problem("Caller is not an admin."),
            )),
            Err(e) => request::Outcome::Error(e),
        }
    }
}

/// Request gate for instructor-only routes.
#[derive(Debug, Clone)]
pub struct InstructorUser(pub UserClaims);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for InstructorUser {
    type Error = Problem;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match lookup_role(req).await {
            Ok((claims, Role::Instructor)) => {
                request::Outcome::Success(InstructorUser(claims))
            }
            Ok(_) => request::Outcome::Error((
                Status::Forbidden,
                forbidden_problem("Caller is not an instructor."),
            )),
            Err(e) => request::Outcome::Error(e),
        }
    }
}

/// Request gate for routes open to admins and instructors alike.
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub claims: UserClaims,
    pub role: Role,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for StaffUser {
    type Error = Problem;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match lookup_role(req).await {
            Ok((claims, role @ (Role::Admin | Role::Instructor))) => {
                request::Outcome::Success(StaffUser { claims, role })
            }
            Ok(_) => request::Outcome::Error((
                Status::Forbidden,
                forbidden_problem("Caller is neither an admin nor an instructor."),
            )),
            Err(e) => request::Outcome::Error(e),
        }
    }
}
