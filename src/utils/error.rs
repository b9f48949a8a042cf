use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    DuplicateEmail,
    DuplicateUsername,
    InvalidCredentials,
    NotFound,
    /// Carries the server-side detail. Never sent to the caller.
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail
            | AppError::DuplicateUsername
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return in a response body
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "Email is already in use",
            AppError::DuplicateUsername => "Username is already in use",
            AppError::InvalidCredentials => "Invalid email or password",
            AppError::NotFound => "User not found",
            AppError::Internal(_) => "Internal server error",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(detail) => write!(f, "Internal error: {}", detail),
            other => write!(f, "{}", other.public_message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Internal(format!("Database error: {}", e))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing error: {}", e))
    }
}
