use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, put},
};

use crate::{error::AppError, response::Fragment, routes::FormValues, state::AppState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/todo",
            get(list_todos).post(create_todo).delete(delete_todo),
        )
        .route("/todo/complete", put(toggle_complete))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Result<Fragment, AppError> {
    let todos = state.todos().list().await?;
    Ok(Fragment::Page(todos))
}

async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Fragment, AppError> {
    let todos = state.todos().list().await?;
    Ok(Fragment::List(todos))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    form: FormValues,
) -> Result<Fragment, AppError> {
    let name = form.require_post("name")?;
    let todo = state.todos().create(name).await?;
    Ok(Fragment::Item(todo))
}

async fn toggle_complete(
    State(state): State<Arc<AppState>>,
    form: FormValues,
) -> Result<Fragment, AppError> {
    let id = form.require("id")?;
    let todo = state.todos().toggle(id).await?;
    Ok(Fragment::Item(todo))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    form: FormValues,
) -> Result<Fragment, AppError> {
    let id = form.require("id")?;
    state.todos().delete(id).await?;
    Ok(Fragment::Deleted)
}
