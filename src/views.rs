use askama::Template;

use crate::{db::entities::todo, response::ErrorDescriptor};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub todos: &'a [todo::Model],
}

#[derive(Template)]
#[template(path = "todo_list.html")]
pub struct TodoListTemplate<'a> {
    pub todos: &'a [todo::Model],
}

#[derive(Template)]
#[template(path = "todo.html")]
pub struct TodoTemplate<'a> {
    pub todo: &'a todo::Model,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub error: &'a ErrorDescriptor,
}
