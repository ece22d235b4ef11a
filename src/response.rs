use askama::Template;
use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    db::entities::todo,
    error::AppError,
    views::{ErrorTemplate, IndexTemplate, TodoListTemplate, TodoTemplate},
};

pub const HX_RETARGET: HeaderName = HeaderName::from_static("hx-retarget");
pub const HX_RESWAP: HeaderName = HeaderName::from_static("hx-reswap");

/// Selector of the list region every error fragment replaces.
pub const ERROR_TARGET: &str = "#todo-list";
pub const ERROR_SWAP: &str = "outerHTML";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// What the error fragment shows: the logical status, not the transport one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub status_code: u16,
    pub status: String,
    pub message: String,
}

impl From<&AppError> for ErrorDescriptor {
    fn from(err: &AppError) -> Self {
        let status = err.status();
        Self {
            status_code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("Error").to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Outcome of a request, rendered into the markup the htmx client swaps in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Page(Vec<todo::Model>),
    List(Vec<todo::Model>),
    Item(todo::Model),
    Deleted,
    Error(ErrorDescriptor),
}

impl Fragment {
    pub fn render(&self) -> askama::Result<String> {
        match self {
            Fragment::Page(todos) => IndexTemplate { todos }.render(),
            Fragment::List(todos) => TodoListTemplate { todos }.render(),
            Fragment::Item(todo) => TodoTemplate { todo }.render(),
            Fragment::Deleted => Ok(String::new()),
            Fragment::Error(error) => ErrorTemplate { error }.render(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Fragment::Error(_))
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(HTML_CONTENT_TYPE),
        );
        if self.is_error() {
            headers.insert(HX_RETARGET, HeaderValue::from_static(ERROR_TARGET));
            headers.insert(HX_RESWAP, HeaderValue::from_static(ERROR_SWAP));
        }
        headers
    }
}

impl IntoResponse for Fragment {
    fn into_response(self) -> Response {
        let headers = self.headers();
        // Status and headers are already decided; a template failure only
        // costs the body.
        let body = self.render().unwrap_or_else(|err| {
            tracing::error!(error = %err, "error executing template");
            String::new()
        });
        (StatusCode::OK, headers, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_app_error(&self);
        Fragment::Error(ErrorDescriptor::from(&self)).into_response()
    }
}

pub fn log_app_error(err: &AppError) {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), message = %err.message(), "request failed");
    } else {
        tracing::warn!(status = status.as_u16(), message = %err.message(), "request rejected");
    }
}
