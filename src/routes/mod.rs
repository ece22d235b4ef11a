use std::sync::Arc;

use axum::{
    Router,
    http::{StatusCode, Uri},
    middleware as axum_middleware,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{error::AppError, state::AppState};

pub mod form;
pub mod middleware;
pub mod todo;

pub use form::FormValues;
pub use middleware::{catch_panic_layer, fragment_error_middleware};

/// Bare routes without the transport layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(todo::router(state))
        .fallback(unknown_route)
}

/// Routes plus the request deadline, fragment error conversion, panic
/// catcher and request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    let timeout = state.config.general.request_timeout();
    router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum_middleware::from_fn(fragment_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}

async fn unknown_route(uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {}", uri.path()))
}
