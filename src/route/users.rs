use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

use crate::config::Config;
use crate::data::parse_object_id;
use crate::data::user::db::{RegisterOutcome, UserDbExt, UserRegistration};
use crate::data::user::User;
use crate::data::UpdatedResponse;
use crate::resp::guard::AdminUser;
use crate::resp::jwt::UserClaims;
use crate::resp::problem::Problem;
use crate::role::Role;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue a signed, time-limited identity token for the supplied email.
#[utoipa::path(
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed bearer token", body = TokenResponse),
    )
)]
#[post("/jwt", format = "application/json", data = "<request>")]
#[tracing::instrument(skip(c))]
pub async fn token_issue(
    request: Json<TokenRequest>,
    c: &State<Config>,
) -> Result<Json<TokenResponse>, Problem> {
    let token = UserClaims::new(&request.email).encode_jwt(c.jwt_secret.as_bytes())?;

    Ok(Json(TokenResponse { token }))
}

/// Register a user. Registering an already-known email leaves the directory
/// untouched and reports it instead of erroring.
#[utoipa::path(request_body = UserRegistration)]
#[post("/users", format = "application/json", data = "<registration>")]
#[tracing::instrument]
pub async fn user_create(
    registration: Json<UserRegistration>,
    db: &State<Database>,
) -> Result<Json<Value>, Problem> {
    match db.register_user(registration.into_inner()).await? {
        RegisterOutcome::Created(id) => Ok(Json(json!({ "inserted_id": id.to_hex() }))),
        RegisterOutcome::AlreadyExists => Ok(Json(json!({ "message": "User Exists" }))),
    }
}

/// Full directory dump.
#[utoipa::path(
    responses(
        (status = 200, description = "Every registered user", body = Vec<User>),
        (status = 401, description = "Missing/expired token", body = Problem),
        (status = 403, description = "Caller is not an admin", body = Problem),
    ),
    security(("jwt" = []))
)]
#[get("/users")]
#[tracing::instrument]
pub async fn user_list(
    _admin: AdminUser,
    db: &State<Database>,
) -> Result<Json<Vec<User>>, Problem> {
    Ok(Json(db.list_users().await?))
}

/// Overwrite a user's role.
#[utoipa::path(responses((status = 200, body = UpdatedResponse)))]
#[patch("/users/<role>/<id>")]
#[tracing::instrument]
pub async fn user_set_role(
    role: Role,
    id: &str,
    db: &State<Database>,
) -> Result<Json<UpdatedResponse>, Problem> {
    let id = parse_object_id(id)?;

    Ok(Json(db.set_user_role(id, role).await?))
}

#[get("/users/<role>/<email>")]
#[tracing::instrument]
pub async fn user_role_check(
    role: Role,
    email: &str,
    db: &State<Database>,
) -> Result<Json<Value>, Problem> {
    let matched = db.user_has_role(email, role).await?;

    let mut body = Map::new();
    body.insert(role.to_string(), Value::Bool(matched));

    Ok(Json(Value::Object(body)))
}

/// Instructor listing, most popular first.
#[utoipa::path(responses((status = 200, body = Vec<User>)))]
#[get("/instructors")]
#[tracing::instrument]
pub async fn instructor_list(db: &State<Database>) -> Result<Json<Vec<User>>, Problem> {
    Ok(Json(db.list_users_by_role(Role::Instructor).await?))
}

///////////////////////
//       TESTS
///////////////////////
