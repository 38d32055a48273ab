//! Route definitions for the AfriFilm HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without infrastructure layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(content_routes())
        .merge(payment_routes())
        .merge(creator_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Auth endpoints: register, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Catalog browsing, details, publishing and deletion
fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contents",
            get(handlers::content::list_contents).post(handlers::content::create_content),
        )
        .route(
            "/contents/{id}",
            get(handlers::content::get_content)
                .put(handlers::content::update_content)
                .delete(handlers::content::delete_content),
        )
        .route("/contents/{id}/access", get(handlers::content::check_access))
}

/// Purchase flow
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payment/create", post(handlers::payment::create_payment))
        .route("/payment/confirm", post(handlers::payment::confirm_payment))
        .route("/payment/history", get(handlers::payment::history))
}

/// Creator dashboard
fn creator_routes() -> Router<AppState> {
    Router::new().route(
        "/creator/contents",
        get(handlers::creator::list_own_contents),
    )
}

/// Admin moderation
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/contents/pending",
            get(handlers::admin::contents::list_pending),
        )
        .route(
            "/admin/contents/{id}/approve",
            post(handlers::admin::contents::approve),
        )
        .route(
            "/admin/contents/{id}/reject",
            post(handlers::admin::contents::reject),
        )
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/verify",
            post(handlers::admin::users::verify_user),
        )
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::ready))
}
