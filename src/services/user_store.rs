use crate::{
    database::MongoDB,
    models::{User, USERS_COLLECTION},
    utils::AppError,
};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    Collection,
};

pub const EMAIL_INDEX: &str = "users_email_unique";
pub const USERNAME_INDEX: &str = "users_username_unique";

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Secondary lookups supported by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Email(String),
    Username(String),
}

impl UserFilter {
    pub fn to_document(&self) -> Document {
        match self {
            UserFilter::Email(email) => doc! { "email": email },
            UserFilter::Username(username) => doc! { "username": username },
        }
    }
}

/// Persistence of account records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    /// Persists a new account and returns it with its assigned id.
    /// A uniqueness conflict comes back as `DuplicateEmail` or `DuplicateUsername`.
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Liveness probe for the backing database
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MongoUserStore {
    db: MongoDB,
    users: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            db: db.clone(),
            users: db.collection::<User>(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(filter.to_document()).await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_one(doc! { "_id": *id }).await?)
    }

    async fn save(&self, mut user: User) -> Result<User, AppError> {
        let id = user.id.unwrap_or_else(ObjectId::new);
        user.id = Some(id);

        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) => {
                if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = e.kind.as_ref() {
                    if write_error.code == DUPLICATE_KEY_CODE {
                        if let Some(conflict) = duplicate_key_conflict(&write_error.message) {
                            return Err(conflict);
                        }
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}

/// Maps a duplicate-key message to the field whose unique index fired.
/// The server names the index, e.g. `E11000 duplicate key error collection:
/// accounts.users index: users_email_unique dup key: { email: "a@x.com" }`.
pub fn duplicate_key_conflict(message: &str) -> Option<AppError> {
    if message.contains(EMAIL_INDEX) {
        Some(AppError::DuplicateEmail)
    } else if message.contains(USERNAME_INDEX) {
        Some(AppError::DuplicateUsername)
    } else {
        None
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_documents() {
        assert_eq!(
            UserFilter::Email("a@x.com".to_string()).to_document(),
            doc! { "email": "a@x.com" }
        );
        assert_eq!(
            UserFilter::Username("alice1".to_string()).to_document(),
            doc! { "username": "alice1" }
        );
    }

    #[test]
    fn test_duplicate_key_conflict_by_index_name() {
        let email = "E11000 duplicate key error collection: accounts.users index: users_email_unique dup key: { email: \"a@x.com\" }";
        let username = "E11000 duplicate key error collection: accounts.users index: users_username_unique dup key: { username: \"alice1\" }";
        let other = "E11000 duplicate key error collection: accounts.users index: _id_ dup key: { _id: ObjectId('65a1') }";

        assert_eq!(duplicate_key_conflict(email), Some(AppError::DuplicateEmail));
        assert_eq!(duplicate_key_conflict(username), Some(AppError::DuplicateUsername));
        assert_eq!(duplicate_key_conflict(other), None);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_unique_indexes_reject_second_insert() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/accounts_test".to_string());
        let db = MongoDB::new(&uri).await.unwrap();
        let store = MongoUserStore::new(&db);

        let suffix = ObjectId::new().to_hex();
        let email = format!("{}@x.com", suffix);
        let first = User::new("A".into(), format!("a{}", suffix), email.clone(), "hash".into());
        let second = User::new("B".into(), format!("b{}", suffix), email, "hash".into());

        let saved = store.save(first).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(store.save(second).await.unwrap_err(), AppError::DuplicateEmail);
    }
}
