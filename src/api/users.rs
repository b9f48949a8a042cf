use crate::api::metrics;
use crate::services::user_service::{
    LoginRequest, LoginResponse, SignupRequest, SignupResponse, UserProfile, UserService,
};
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

fn error_response(context: &str, e: &AppError) -> HttpResponse {
    metrics::increment_error_count();

    if e.is_internal() {
        log::error!("❌ {} failed: {}", context, e);
    } else {
        log::warn!("❌ {} failed: {}", context, e);
    }

    HttpResponse::build(e.status_code()).json(ErrorResponse {
        success: false,
        message: e.public_message().to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Email or username already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn signup(
    service: web::Data<UserService>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    log::info!("📝 POST /users/signup - username: {}", request.username);
    metrics::increment_request_count();

    match service.register(&request).await {
        Ok(response) => {
            metrics::increment_signup_count();
            HttpResponse::Created().json(response)
        }
        Err(e) => error_response("Signup", &e),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    service: web::Data<UserService>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::debug!("🔐 POST /users/login - email: {}", request.email);
    metrics::increment_request_count();

    match service.authenticate(&request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", response.username);
            metrics::increment_login_count();
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            if e == AppError::InvalidCredentials {
                metrics::increment_login_failure_count();
            }
            error_response("Login", &e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User identifier (24-char hex ObjectId)")
    ),
    responses(
        (status = 200, description = "User found", body = UserProfile),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_user_by_id(
    service: web::Data<UserService>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("👤 GET /users/{}", id);
    metrics::increment_request_count();

    match service.get_by_id(&id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => error_response("User lookup", &e),
    }
}
