// src/routes.rs

use axum::{
    Json, Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, quiz, ranking, user},
    state::AppState,
    utils::jwt::auth_middleware,
};

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Assembles the main application router.
///
/// * `/api/user/login` and `/api/health` are public.
/// * Everything else requires a bearer token.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let user_routes = Router::new()
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/stats", get(user::get_stats))
                .route("/profile", get(user::get_profile))
                .layer(auth_layer.clone()),
        );

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/history", get(quiz::get_history))
        .layer(auth_layer.clone());

    let ranking_routes = Router::new()
        .route("/list", get(ranking::get_leaderboard))
        .layer(auth_layer);

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/user", user_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/ranking", ranking_routes)
        // Global Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
