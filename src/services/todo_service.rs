use sea_orm::DatabaseConnection;

use crate::{
    db::{
        dao::{StoreError, TodoDao},
        entities::todo,
    },
    error::AppError,
};

#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub fn from_db(db: &DatabaseConnection) -> Self {
        Self::new(TodoDao::new(db))
    }

    pub async fn list(&self) -> Result<Vec<todo::Model>, AppError> {
        Ok(self.todo_dao.list().await?)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.todo_dao.count().await?)
    }

    /// `name` has already passed the presence check.
    pub async fn create(&self, name: &str) -> Result<todo::Model, AppError> {
        let created = self.todo_dao.create(name).await?;
        tracing::debug!(id = created.id, "todo created");
        Ok(created)
    }

    /// An id that is not an integer cannot match any row, so it reports the
    /// same not-found failure as a missing one.
    pub async fn toggle(&self, raw_id: &str) -> Result<todo::Model, AppError> {
        let id = parse_id(raw_id).ok_or_else(|| StoreError::NotFound {
            id: raw_id.to_string(),
        })?;
        let toggled = self.todo_dao.toggle(id).await?;
        tracing::debug!(id, completed = toggled.completed, "todo toggled");
        Ok(toggled)
    }

    /// Idempotent: unknown or non-integer ids succeed without touching the
    /// table.
    pub async fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let Some(id) = parse_id(raw_id) else {
            tracing::debug!(id = raw_id, "delete ignored non-integer id");
            return Ok(());
        };
        let removed = self.todo_dao.delete(id).await?;
        tracing::debug!(id, removed, "todo deleted");
        Ok(())
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::{TodoService, parse_id};
    use crate::{db::entities::todo, error::AppError};

    #[test]
    fn parses_integer_ids_only() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
    }

    #[tokio::test]
    async fn toggle_with_non_integer_id_never_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = TodoService::from_db(&db);

        let err = service.toggle("abc").await.expect_err("toggle should fail");
        assert_eq!(err, AppError::internal("todo not found (id=abc)"));
    }

    #[tokio::test]
    async fn toggle_of_missing_row_is_internal_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let service = TodoService::from_db(&db);

        let err = service.toggle("5").await.expect_err("toggle should fail");
        assert_eq!(err, AppError::internal("todo not found (id=5)"));
    }

    #[tokio::test]
    async fn delete_with_non_integer_id_is_a_no_op() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = TodoService::from_db(&db);

        service.delete("abc").await.expect("delete should succeed");
    }

    #[tokio::test]
    async fn delete_of_missing_row_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = TodoService::from_db(&db);

        service.delete("404").await.expect("delete should succeed");
    }

    #[tokio::test]
    async fn list_failures_surface_verbatim() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("no such table: todos".to_string())])
            .into_connection();
        let service = TodoService::from_db(&db);

        let err = service.list().await.expect_err("list should fail");
        assert!(matches!(err, AppError::Internal(ref message) if message.contains("no such table: todos")));
    }
}
