use bson::Document;
use mongodb::Database;
use rocket::http::Header;
use rocket::local::asynchronous::Client;

use crate::config::Config;
use crate::data::user::{filter, User, USER_COLLECTION_NAME};
use crate::resp::jwt::UserClaims;
use crate::role::Role;

pub async fn client() -> Client {
    let rocket = crate::create(None).await.expect("invalid backend");

    Client::tracked(rocket).await.expect("valid rocket instance")
}

pub fn bearer(config: &Config, email: &str) -> Header<'static> {
    let token = UserClaims::new(email)
        .encode_jwt(config.jwt_secret.as_bytes())
        .expect("encodable claims");

    Header::new("Authorization", format!("Bearer {}", token))
}

pub async fn seed_user(db: &Database, email: &str, role: Role) {
    remove_user(db, email).await;

    let mut user = User::new(email, email);
    user.role = role;

    db.collection(USER_COLLECTION_NAME)
        .insert_one(
            bson::to_document(&user).expect("User must be serializable to BSON"),
            None,
        )
        .await
        .expect("unable to seed test user");
}

pub async fn remove_user(db: &Database, email: &str) {
    db.collection::<Document>(USER_COLLECTION_NAME)
        .delete_many(filter::by_email(email), None)
        .await
        .expect("unable to remove test users");
}
