use bson::oid::ObjectId;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use rocket::http::Status;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::resp::problem::Problem;

pub mod booking;
pub mod class;
pub mod payment;
pub mod submission;
pub mod user;

/// Acknowledgement for a single-document insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsertedResponse {
    pub inserted_id: String,
}

impl From<InsertOneResult> for InsertedResponse {
    fn from(result: InsertOneResult) -> Self {
        InsertedResponse {
            inserted_id: result
                .inserted_id
                .as_object_id()
                .expect("inserted ids are store-generated ObjectIds")
                .to_hex(),
        }
    }
}

/// Acknowledgement for a single-document update. A missing target surfaces
/// as `matched_count: 0`, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdatedResponse {
    fn from(result: UpdateResult) -> Self {
        UpdatedResponse {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

/// Acknowledgement for a single-document delete. A missing target surfaces
/// as `deleted_count: 0`, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeletedResponse {
    fn from(result: DeleteResult) -> Self {
        DeletedResponse {
            deleted_count: result.deleted_count,
        }
    }
}

pub fn parse_object_id(id: impl AsRef<str>) -> Result<ObjectId, Problem> {
    ObjectId::parse_str(id.as_ref()).map_err(|_| {
        Problem::new(Status::BadRequest, "Malformed document id.")
            .insert_str("id", id.as_ref())
            .clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_parse_from_hex_only() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(id.to_hex()).unwrap(), id);

        let problem = parse_object_id("not-an-id").unwrap_err();
        assert_eq!(problem.status, Status::BadRequest);
    }
}
