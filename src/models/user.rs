use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USERS_COLLECTION: &str = "users";

/// Account document stored in the `users` collection
#[derive(Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plaintext
    pub password: String,
    pub created_at: Option<BsonDateTime>,
}

impl User {
    pub fn new(name: String, username: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            name,
            username,
            email,
            password: password_hash,
            created_at: Some(BsonDateTime::now()),
        }
    }

    /// Hex form of the identifier, empty until the store assigns one
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

// Hand-written so the credential hash never reaches a log line
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
