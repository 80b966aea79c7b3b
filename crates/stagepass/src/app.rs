use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use stagepass_auth::auth_routes;

use crate::{
    handlers::{
        events::{list_events, save_event},
        health::{healthz, livez},
        root::index,
        saved::my_events,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(index))
        .route("/events", get(list_events))
        .route("/events/{event_id}/save", post(save_event))
        .route("/my/events", get(my_events))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .merge(auth_routes().with_state(state.auth.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
