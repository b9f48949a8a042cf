use crate::{
    models::User,
    services::{
        hasher::CredentialHasher,
        user_store::{UserFilter, UserStore},
    },
    utils::AppError,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// Request/Response structures
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub name: String,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub name: String,
    pub username: String,
    pub id: String,
}

/// Public view of an account. Never carries the credential hash.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id_hex(),
            name: user.name,
            username: user.username,
            email: user.email,
        }
    }
}

/// Account registration, login and lookup over an injected store and hasher
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Email is checked before username, so a double collision reports the email.
    /// The pre-checks are not atomic with the insert; the store's unique
    /// indexes catch a concurrent registration that slips past them.
    pub async fn register(&self, request: &SignupRequest) -> Result<SignupResponse, AppError> {
        if self
            .store
            .find_one(&UserFilter::Email(request.email.clone()))
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail);
        }

        if self
            .store
            .find_one(&UserFilter::Username(request.username.clone()))
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername);
        }

        let password_hash = self.hash_password(request.password.clone()).await?;

        let user = self
            .store
            .save(User::new(
                request.name.clone(),
                request.username.clone(),
                request.email.clone(),
                password_hash,
            ))
            .await?;

        log::info!("✅ User registered: {} ({})", user.username, user.id_hex());

        Ok(SignupResponse {
            success: true,
            message: "User created successfully".to_string(),
            id: user.id_hex(),
            name: user.name,
        })
    }

    /// Unknown email and wrong password fail identically
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .store
            .find_one(&UserFilter::Email(request.email.clone()))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.verify_password(request.password.clone(), user.password.clone()).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            id: user.id_hex(),
            name: user.name,
            username: user.username,
        })
    }

    // bcrypt is CPU-bound; keep it off the worker running this request
    async fn hash_password(&self, plaintext: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, plaintext: String, hash: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// A string that is not a valid ObjectId cannot name an account, so it is `NotFound`
    pub async fn get_by_id(&self, id: &str) -> Result<UserProfile, AppError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => {
                log::debug!("Malformed user id: {}", id);
                return Err(AppError::NotFound);
            }
        };

        self.store
            .find_by_id(&object_id)
            .await?
            .map(UserProfile::from)
            .ok_or(AppError::NotFound)
    }
}
