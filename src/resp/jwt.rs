use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{self, FromRequest, Request};
use serde::{Deserialize, Serialize};

use super::util::date_time_as_unix_seconds;
use crate::config::Config;
use crate::resp::problem::Problem;

/// Signed identity claims attached to every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(with = "date_time_as_unix_seconds")]
    iat: DateTime<Utc>,
    #[serde(with = "date_time_as_unix_seconds")]
    exp: DateTime<Utc>,
    pub email: String,
}

impl UserClaims {
    pub fn new(email: impl ToString) -> UserClaims {
        let now = Utc::now();
        UserClaims {
            iat: now,
            exp: now + Duration::hours(1),
            email: email.to_string(),
        }
    }

    pub fn encode_jwt(
        &self,
        secret: impl AsRef<[u8]>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &self, &key)
    }
}

pub fn auth_problem(detail: impl ToString) -> Problem {
    Problem::new(Status::Unauthorized, "Unable to authorize user.")
        .detail(detail)
        .clone()
}

pub fn extract_claims(
    auth_header: Option<&str>,
    secret: impl AsRef<[u8]>,
) -> Result<UserClaims, Problem> {
    let header = auth_header.ok_or_else(|| auth_problem("No Authorization header."))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| auth_problem("Authorization header is not a bearer token."))?;
    tracing::debug!("extracted bearer token from Authorization header");

    match decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    {
        Ok(it) => {
            tracing::debug!("decoded user claims for: {}", it.email);

            Ok(it)
        }
        Err(_) => Err(auth_problem("Bearer token was malformed or expired.")),
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UserClaims {
    type Error = Problem;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let config: &Config = req
            .rocket()
            .state()
            .expect("Config is managed at startup");

        tracing::trace!("extracting user claims from request headers");
        let claims = match extract_claims(
            req.headers().get_one("Authorization"),
            config.jwt_secret.as_bytes(),
        ) {
            Ok(it) => it,
            Err(e) => {
                tracing::debug!("unable to extract claims from headers");
                return request::Outcome::Error((Status::Unauthorized, e));
            }
        };

        request::Outcome::Success(claims)
    }
}

pub mod doc {
    use utoipa::openapi::security::*;

    #[derive(Clone, Copy)]
    pub struct JWTAuth;

    impl Into<SecurityScheme> for JWTAuth {
        fn into(self) -> SecurityScheme {
            let mut http = Http::new(HttpAuthScheme::Bearer);
            http.bearer_format = Some("JWT".to_string());
            http.scheme = HttpAuthScheme::Bearer;
            SecurityScheme::Http(http)
        }
    }

    impl utoipa::Modify for JWTAuth {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            let c = openapi.components.as_mut().unwrap();
            c.add_security_scheme("jwt", *self)
        }
    }
}
