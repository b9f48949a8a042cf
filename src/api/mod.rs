pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Registers every route served by this service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Account endpoints
        .service(
            web::scope("/api/v1/users")
                .route("/signup", web::post().to(users::signup))
                .route("/login", web::post().to(users::login))
                .route("/{id}", web::get().to(users::get_user_by_id)),
        );
}
