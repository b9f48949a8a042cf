use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "Account registration, login and lookup.\n\n**Endpoints:**\n- Sign up with name, username, email and password\n- Log in with email and password\n- Fetch the public profile of an account by id\n- Health check and request metrics",
        contact(
            name = "Account Service Team"
        )
    ),
    paths(
        // Users
        crate::api::users::signup,
        crate::api::users::login,
        crate::api::users::get_user_by_id,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::services::user_service::SignupRequest,
            crate::services::user_service::SignupResponse,
            crate::services::user_service::LoginRequest,
            crate::services::user_service::LoginResponse,
            crate::services::user_service::UserProfile,
            crate::api::users::ErrorResponse,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Account registration, login and lookup. Email and username are unique across accounts."),
        (name = "Health", description = "Health check and request counters for monitoring service status."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_account_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/api/v1/users/signup"));
        assert!(paths.contains_key("/api/v1/users/login"));
        assert!(paths.contains_key("/api/v1/users/{id}"));
        assert!(paths.contains_key("/health"));
    }
}
