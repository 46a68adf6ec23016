use bson::oid::ObjectId;
use bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::Database;
use rocket::futures::StreamExt;
use utoipa::ToSchema;

use crate::data::UpdatedResponse;
use crate::resp::problem::Problem;
use crate::role::Role;

use super::filter;
use super::{User, USER_COLLECTION_NAME};

/// Registration payload. Role and enrollment counters are always
/// server-assigned.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserRegistration {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl From<UserRegistration> for User {
    fn from(reg: UserRegistration) -> Self {
        let mut user = User::new(reg.email, reg.name);
        user.photo_url = reg.photo_url;
        user
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created(ObjectId),
    /// The email was already registered; the directory is left untouched.
    AlreadyExists,
}

#[allow(async_fn_in_trait)]
pub trait UserDbExt {
    async fn register_user(&self, reg: UserRegistration) -> Result<RegisterOutcome, Problem>;

    async fn find_user_by_email(&self, email: impl AsRef<str>) -> Result<Option<User>, Problem>;

    async fn user_has_role(&self, email: impl AsRef<str>, role: Role) -> Result<bool, Problem>;

    async fn set_user_role(&self, id: ObjectId, role: Role) -> Result<UpdatedResponse, Problem>;

    async fn list_users(&self) -> Result<Vec<User>, Problem>;

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, Problem>;
}

impl UserDbExt for Database {
    async fn register_user(&self, reg: UserRegistration) -> Result<RegisterOutcome, Problem> {
        if self.find_user_by_email(&reg.email).await?.is_some() {
            return Ok(RegisterOutcome::AlreadyExists);
        }

        let user = User::from(reg);

        let result = self
            .collection(USER_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&user).expect("User must be serializable to BSON"),
                None,
            )
            .await
            .map_err(Problem::from)?;

        Ok(RegisterOutcome::Created(
            result
                .inserted_id
                .as_object_id()
                .expect("inserted ids are store-generated ObjectIds"),
        ))
    }

    async fn find_user_by_email(&self, email: impl AsRef<str>) -> Result<Option<User>, Problem> {
        self.collection(USER_COLLECTION_NAME)
            .find_one(filter::by_email(email), None)
            .await
            .map_err(Problem::from)
    }

    async fn user_has_role(&self, email: impl AsRef<str>, role: Role) -> Result<bool, Problem> {
        Ok(self
            .find_user_by_email(email)
            .await?
            .map(|user| user.role == role)
            .unwrap_or(false))
    }

    async fn set_user_role(&self, id: ObjectId, role: Role) -> Result<UpdatedResponse, Problem> {
        self.collection::<Document>(USER_COLLECTION_NAME)
            .update_one(
                filter::by_id(id),
                doc! { "$set": { "role": role.as_str() } },
                None,
            )
            .await
            .map(UpdatedResponse::from)
            .map_err(Problem::from)
    }

    async fn list_users(&self) -> Result<Vec<User>, Problem> {
        let mut documents = self
            .collection::<User>(USER_COLLECTION_NAME)
            .find(None, None)
            .await
            .map_err(Problem::from)?;

        let mut users = vec![];
        while let Some(user) = documents.next().await {
            match user {
                Ok(user) => users.push(user),
                Err(_) => {
                    tracing::warn!("Unable to deserialize User document.")
                }
            }
        }

        Ok(users)
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, Problem> {
        let options = FindOptions::builder()
            .sort(doc! { "students": -1 })
            .build();

        let mut documents = self
            .collection::<User>(USER_COLLECTION_NAME)
            .find(filter::by_role(role), options)
            .await
            .map_err(Problem::from)?;

        let mut users = vec![];
        while let Some(user) = documents.next().await {
            match user {
                Ok(user) => users.push(user),
                Err(_) => {
                    tracing::warn!("Unable to deserialize User document.")
                }
            }
        }

        Ok(users)
    }
}
