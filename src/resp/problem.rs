use std::io::Cursor;

use rocket::http::ContentType;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::{response, Request, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use utoipa::ToSchema;

/// Error body shared by every failing response.
///
/// Serializes as `{"error": true, "message": ..., "status": ...}` plus any
/// extra fields attached by the failing handler.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Problem {
    #[serde(skip)]
    #[schema(value_type = u16)]
    pub status: Status,
    pub message: String,

    pub detail: Option<String>,

    #[schema(value_type = Object)]
    pub body: Map<String, Value>,
}

impl Default for Problem {
    fn default() -> Self {
        Problem {
            status: Status::InternalServerError,
            message: "Problem".to_string(),
            detail: None,
            body: Map::new(),
        }
    }
}

impl Problem {
    pub fn new(status: Status, message: impl ToString) -> Problem {
        Problem {
            status,
            message: message.to_string(),
            ..Default::default()
        }
    }

    pub fn detail(&mut self, value: impl ToString) -> &mut Problem {
        self.detail = Some(value.to_string());
        self
    }

    pub fn insert<V: Serialize>(&mut self, key: impl ToString, value: V) -> &mut Problem {
        self.body.insert(
            key.to_string(),
            serde_json::to_value(value).expect("data must be JSON serializable"),
        );
        self
    }

    pub fn insert_str(&mut self, key: impl ToString, value: impl ToString) -> &mut Problem {
        self.body
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for Problem {}

impl<'r> Responder<'r, 'static> for Problem {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut body = self.body.clone();

        body.insert(String::from("error"), Value::Bool(true));
        body.insert(String::from("message"), Value::from(self.message));
        if let Some(detail) = self.detail {
            body.insert(String::from("detail"), Value::from(detail));
        }
        body.insert(String::from("status"), Value::from(self.status.code));

        let body_string = serde_json::to_string(&body)
            .expect("JSON map keys and values must be JSON serializable");

        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(body_string.len(), Cursor::new(body_string))
            .ok()
    }
}

impl From<mongodb::error::Error> for Problem {
    fn from(e: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        fn store_problem() -> Problem {
            Problem::new(
                Status::InternalServerError,
                "Document store failed while processing request.",
            )
        }

        fn access_problem() -> Problem {
            Problem::new(
                Status::InternalServerError,
                "Server was unable to access the document store.",
            )
        }

        fn bad_store_request() -> Problem {
            Problem::new(
                Status::InternalServerError,
                "Document store was unable to process bad server request.",
            )
        }

        // The cause stays in the log, the response stays opaque.
        tracing::error!("document store failure: {}", e);

        match e.kind.as_ref() {
            ErrorKind::InvalidArgument { .. } => bad_store_request(),
            ErrorKind::Authentication { .. } => access_problem(),
            ErrorKind::BsonDeserialization(_) => bad_store_request(),
            ErrorKind::BsonSerialization(_) => bad_store_request(),
            ErrorKind::Command(_) => bad_store_request(),
            ErrorKind::DnsResolve { .. } => access_problem(),
            ErrorKind::ServerSelection { .. } => access_problem(),
            ErrorKind::Io(_) => store_problem()
                .detail("An IO error occurred. Submitted data might not be properly stored.")
                .clone(),
            ErrorKind::Write(_) => store_problem()
                .detail("A write error occurred. Submitted data might not be properly stored.")
                .clone(),
            _ => store_problem(),
        }
    }
}

impl From<bson::de::Error> for Problem {
    fn from(_: bson::de::Error) -> Self {
        Problem::new(
            Status::InternalServerError,
            "An error occurred while processing BSON data.",
        )
    }
}

impl From<serde_json::Error> for Problem {
    fn from(_: serde_json::Error) -> Self {
        Problem::new(
            Status::InternalServerError,
            "An error occurred while processing JSON data.",
        )
    }
}

impl From<jsonwebtoken::errors::Error> for Problem {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.into_kind() {
            ErrorKind::ExpiredSignature => {
                Problem::new(Status::Unauthorized, "Expired JWT signature.")
            }
            _ => Problem::new(Status::Unauthorized, "Error while handling JWT."),
        }
    }
}

impl From<reqwest::Error> for Problem {
    fn from(e: reqwest::Error) -> Self {
        tracing::error!("payment processor request failed: {}", e);

        Problem::new(Status::BadGateway, "Payment processor request failed.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_builder_attaches_fields() {
        let problem = Problem::new(Status::Forbidden, "Insufficient permissions.")
            .detail("Caller is not an admin.")
            .insert_str("email", "someone@example.com")
            .clone();

        assert_eq!(problem.status, Status::Forbidden);
        assert_eq!(problem.message, "Insufficient permissions.");
        assert_eq!(problem.detail.as_deref(), Some("Caller is not an admin."));
        assert_eq!(
            problem.body.get("email"),
            Some(&Value::String("someone@example.com".to_string()))
        );
    }

    #[test]
    fn expired_tokens_map_to_unauthorized() {
        let err = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::ExpiredSignature,
        );

        assert_eq!(Problem::from(err).status, Status::Unauthorized);
    }
}
