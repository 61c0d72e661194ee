use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::{Result, TodoError},
    models::Todo,
};

/// Convert SQLite row to Todo model
pub fn row_to_todo(row: &SqliteRow) -> Result<Todo> {
    let id: i64 = row.try_get("id").map_err(sqlx_error_to_todo_error)?;
    // Legacy rows may carry a NULL task; surface them as empty text
    let task: Option<String> = row.try_get("task").map_err(sqlx_error_to_todo_error)?;
    let completed: bool = row.try_get("completed").map_err(sqlx_error_to_todo_error)?;

    Ok(Todo {
        id,
        task: task.unwrap_or_default(),
        completed,
    })
}

/// Convert SQLx error to TodoError
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            TodoError::Database(format!("Database constraint error: {}", db_err.message()))
        }
        sqlx::Error::RowNotFound => {
            // Absent rows are reported through Option / NotFound at the call site
            TodoError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TodoError::Database("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TodoError::Database("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TodoError::Database(format!("Database I/O error: {io_err}")),
        sqlx::Error::ColumnNotFound(column) => {
            TodoError::Database(format!("Column not found: {column}"))
        }
        _ => TodoError::Database(format!("Database operation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_mapping() {
        let error = sqlx_error_to_todo_error(sqlx::Error::PoolTimedOut);
        assert_eq!(
            error,
            TodoError::Database("Connection pool timeout".to_string())
        );
    }

    #[test]
    fn test_row_not_found_is_not_a_not_found_signal() {
        let error = sqlx_error_to_todo_error(sqlx::Error::RowNotFound);
        assert!(error.is_database());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_io_error_mapping() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error = sqlx_error_to_todo_error(sqlx::Error::Io(io));
        assert_eq!(
            error,
            TodoError::Database("Database I/O error: read-only".to_string())
        );
    }
}
