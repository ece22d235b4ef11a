use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{Form, FromRequest, Multipart, Query, Request},
    http::{HeaderMap, header},
};

use crate::error::AppError;

/// Url-encoded or multipart request fields, kept apart by origin so handlers can choose
/// body-only lookup or body-then-query lookup.
///
/// Extraction never rejects: a missing or malformed body is an empty form,
/// and the handler reports the absent field itself.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    body: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl FormValues {
    pub fn new(body: HashMap<String, String>, query: HashMap<String, String>) -> Self {
        Self { body, query }
    }

    /// Field from the request body only.
    pub fn post_value(&self, field: &str) -> Option<&str> {
        self.body.get(field).map(String::as_str)
    }

    /// Field from the body, falling back to the query string.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.post_value(field)
            .or_else(|| self.query.get(field).map(String::as_str))
    }

    pub fn require_post(&self, field: &str) -> Result<&str, AppError> {
        present(field, self.post_value(field))
    }

    pub fn require(&self, field: &str) -> Result<&str, AppError> {
        present(field, self.value(field))
    }
}

// Exact empty-string check; whitespace counts as a value.
fn present<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::missing_field(field)),
    }
}

impl<S> FromRequest<S> for FormValues
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = match Query::<HashMap<String, String>>::try_from_uri(req.uri()) {
            Ok(Query(query)) => query,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed query string");
                HashMap::new()
            }
        };

        let body = if is_multipart(req.headers()) {
            multipart_fields(req, state).await
        } else {
            match Form::<HashMap<String, String>>::from_request(req, state).await {
                Ok(Form(body)) => body,
                Err(err) => {
                    tracing::debug!(error = %err, "treating unreadable form body as empty");
                    HashMap::new()
                }
            }
        };

        Ok(Self::new(body, query))
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

// Text parts only; file uploads are skipped. Fields read before a malformed
// part are kept.
async fn multipart_fields<S>(req: Request, state: &S) -> HashMap<String, String>
where
    S: Send + Sync,
{
    let mut fields = HashMap::new();
    let mut multipart = match Multipart::from_request(req, state).await {
        Ok(multipart) => multipart,
        Err(err) => {
            tracing::debug!(error = %err, "treating unreadable multipart body as empty");
            return fields;
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(error = %err, "stopping at malformed multipart field");
                break;
            }
        };
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field.text().await {
            Ok(value) => {
                fields.insert(name, value);
            }
            Err(err) => {
                tracing::debug!(error = %err, field = %name, "stopping at unreadable multipart field");
                break;
            }
        }
    }
    fields
}
