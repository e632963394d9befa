use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/users", post(handlers::users::register_user))
        .route("/api/donors", get(handlers::users::list_donors))
        .route("/api/donors/search", get(handlers::users::search_donors))
        .route(
            "/api/requests",
            post(handlers::requests::create_request).get(handlers::requests::list_requests),
        )
        .route("/api/requests/urgent", get(handlers::requests::urgent_requests))
        .route("/api/requests/:id", get(handlers::requests::get_request))
        .route("/api/donation/accept", post(handlers::donation::accept_donation))
        .route(
            "/api/donation/complete/:donation_id",
            post(handlers::donation::complete_donation),
        )
        .layer(cors)
        .with_state(state)
}
