// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, quiz},
    state::AppState,
    utils::auth::admin_middleware,
};

/// Assembles the main application router.
///
/// * Merges the public quiz routes and the gated admin routes.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store + config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let quiz_routes = Router::new()
        .route("/list", get(quiz::list_quizzes))
        .route("/latest", get(quiz::latest_quiz))
        .route("/submit", post(quiz::submit_quiz))
        .route("/download", post(quiz::download_result))
        .route("/{id}", get(quiz::get_quiz));

    let admin_routes = Router::new()
        .route("/quizzes", post(admin::upload_quiz))
        .route("/quizzes/import-text", post(admin::import_quiz_text))
        .route("/quizzes/generate", post(admin::generate_quiz))
        .route("/quizzes/{id}", put(admin::replace_quiz))
        .route("/submissions", get(admin::list_submissions))
        .route("/submissions/{id}/approve", post(admin::approve_submission))
        // Shared-secret gate for the whole admin surface
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
