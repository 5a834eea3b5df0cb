// src/routes.rs

use axum::{
    Json, Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{quiz, submission},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Quiz retrieval and listing are public; creation, submission, results
///   and my-submissions authenticate through the `AuthUser` extractor.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, collaborator gateways).
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

    // Role and ownership checks live in the handlers because they need the
    // database anyway.
    let course_routes = Router::new()
        .route(
            "/{course_id}/quizzes",
            get(quiz::list_course_quizzes).post(quiz::create_quiz),
        )
        .route("/{course_id}/quizzes/{quiz_id}", get(quiz::get_quiz))
        .route(
            "/{course_id}/quizzes/{quiz_id}/submit",
            post(submission::submit_quiz),
        )
        .route(
            "/{course_id}/quizzes/{quiz_id}/results",
            get(submission::quiz_results),
        )
        .route(
            "/{course_id}/quizzes/submissions/my",
            get(submission::my_submissions),
        );

    Router::new()
        .nest("/api/courses", course_routes)
        .route("/health", get(health_check))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "quiz-engine",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
