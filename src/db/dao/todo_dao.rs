use chrono::{Duration, SubsecRound, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set,
    prelude::DateTimeWithTimeZone,
};

use super::{DaoResult, StoreError};
use crate::db::entities::{prelude::Todo, todo};

/// Persistence for the single `todos` table.
#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl TodoDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// All rows in storage order. No ORDER BY is applied.
    pub async fn list(&self) -> DaoResult<Vec<todo::Model>> {
        Ok(Todo::find().all(&self.db).await?)
    }

    pub async fn count(&self) -> DaoResult<u64> {
        Ok(Todo::find().count(&self.db).await?)
    }

    pub async fn create(&self, name: &str) -> DaoResult<todo::Model> {
        let now = now();
        let model = todo::ActiveModel {
            name: Set(name.to_string()),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Flips `completed` and bumps `updated_at`. Concurrent toggles are
    /// last-write-wins.
    pub async fn toggle(&self, id: i32) -> DaoResult<todo::Model> {
        let Some(current) = Todo::find_by_id(id).one(&self.db).await? else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };

        let completed = !current.completed;
        let updated_at = next_updated_at(current.updated_at);
        let mut active: todo::ActiveModel = current.into();
        active.completed = Set(completed);
        active.updated_at = Set(updated_at);

        match active.update(&self.db).await {
            Ok(model) => Ok(model),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Err(StoreError::NotFound { id: id.to_string() }),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes the row if present. Returns whether a row was removed;
    /// a missing row is not an error.
    pub async fn delete(&self, id: i32) -> DaoResult<bool> {
        let result = Todo::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// Microsecond precision survives a round trip through both backends.
fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset().trunc_subsecs(6)
}

// updated_at must strictly increase on every mutation, even when two land
// inside the same clock tick.
fn next_updated_at(previous: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::{TodoDao, next_updated_at};
    use crate::db::{dao::StoreError, entities::todo};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn todo_model(id: i32, name: &str, completed: bool) -> todo::Model {
        let now = ts();
        todo::Model {
            id,
            name: name.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn toggle_reports_not_found_when_row_is_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.toggle(42).await.expect_err("toggle should fail");
        assert!(matches!(err, StoreError::NotFound { ref id } if id == "42"));
        assert_eq!(err.to_string(), "todo not found (id=42)");
    }

    #[tokio::test]
    async fn toggle_returns_post_mutation_row() {
        let mut flipped = todo_model(7, "Buy milk", true);
        flipped.updated_at = ts() + chrono::Duration::seconds(1);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[todo_model(7, "Buy milk", false)]])
            .append_query_results([[flipped.clone()]])
            .into_connection();
        let dao = TodoDao::new(&db);

        let toggled = dao.toggle(7).await.expect("toggle should succeed");
        assert_eq!(toggled, flipped);
    }

    #[tokio::test]
    async fn list_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("list failed".to_string())])
            .into_connection();
        let dao = TodoDao::new(&db);

        let err = dao.list().await.expect_err("list should fail");
        assert!(matches!(err, StoreError::Db(_)));
        assert!(err.to_string().contains("list failed"));
    }

    #[tokio::test]
    async fn delete_of_missing_row_is_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = TodoDao::new(&db);

        let removed = dao.delete(999).await.expect("delete should succeed");
        assert!(!removed);
    }

    #[test]
    fn updated_at_moves_forward_even_if_clock_lags() {
        let future = ts() + chrono::Duration::days(365 * 100);
        let next = next_updated_at(future);
        assert_eq!(next, future + chrono::Duration::microseconds(1));
    }

    #[test]
    fn updated_at_uses_clock_when_it_is_ahead() {
        let next = next_updated_at(ts());
        assert!(next > ts());
    }
}
