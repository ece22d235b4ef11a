use std::any::Any;

use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::AppError, logging::panic_message, response::HX_RETARGET};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites framework-generated failures (unknown route, wrong method,
/// timeout) into error fragments so the client only ever sees 200.
pub async fn fragment_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();

    if status.is_success() || response.headers().contains_key(HX_RETARGET) {
        return response;
    }
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let message = match to_bytes(response.into_body(), MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => body_bytes_to_message(status, bytes),
        Err(_) => default_message(status),
    };
    AppError::from_status(status, message).into_response()
}

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_fragment)
}

fn panic_to_fragment(panic: Box<dyn Any + Send + 'static>) -> Response {
    let client_message = if cfg!(debug_assertions) {
        format!("internal server error: {}", panic_message(panic.as_ref()))
    } else {
        "internal server error".to_string()
    };
    AppError::internal(client_message).into_response()
}

fn body_bytes_to_message(status: StatusCode, bytes: Bytes) -> String {
    let message = String::from_utf8_lossy(&bytes).trim().to_string();
    if message.is_empty() {
        return default_message(status);
    }
    message
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
