use crate::common::{row_to_todo, sqlx_error_to_todo_error};
use async_trait::async_trait;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo, UpdateTodo},
    repository::TodoRepository,
};

/// Connection pool sizing for [`SqliteTodoRepository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the TodoRepository trait
///
/// Writes run inside a transaction checked out from the pool. The transaction
/// commits when the operation succeeds; on any early return it is dropped,
/// which rolls it back and hands the connection back to the pool.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (`sqlite://path`, bare path, or `:memory:`)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite:///tmp/todos.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite repository with explicit pool settings
    pub async fn with_settings(database_url: &str, settings: PoolSettings) -> Result<Self> {
        if is_memory_url(database_url) {
            // Every connection to :memory: is a separate database, so keep
            // exactly one connection alive for the lifetime of the pool.
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_todo_error)?
                .journal_mode(SqliteJournalMode::Memory)
                .busy_timeout(Duration::from_secs(5));

            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(connect_options)
                .await
                .map_err(sqlx_error_to_todo_error)?;

            return Ok(Self { pool });
        }

        let db_url = normalize_database_url(database_url);

        // Create database if it doesn't exist
        if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
            match Sqlite::create_database(&db_url).await {
                Ok(_) => tracing::info!(database_url = %db_url, "Database created successfully"),
                Err(error) => {
                    tracing::error!("Error creating database: {}", error);
                    return Err(TodoError::Database(format!(
                        "Failed to create database: {error}"
                    )));
                }
            }
        }

        let connect_options = SqliteConnectOptions::from_str(&db_url)
            .map_err(sqlx_error_to_todo_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(Self { pool })
    }

    /// Create the `todos` table if it does not exist yet
    ///
    /// Safe to call on every startup; already-applied migrations are skipped.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(database_url: &str) -> bool {
    matches!(
        database_url,
        ":memory:" | "sqlite::memory:" | "sqlite://:memory:"
    )
}

fn normalize_database_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite://{database_url}")
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        if todo.task.trim().is_empty() {
            return Err(TodoError::empty_field("task"));
        }

        let mut tx = self.pool.begin().await.map_err(sqlx_error_to_todo_error)?;

        let row = sqlx::query(
            "INSERT INTO todos (task, completed) VALUES (?, ?) RETURNING id, task, completed",
        )
        .bind(&todo.task)
        .bind(false)
        .fetch_one(&mut *tx)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        let created = row_to_todo(&row)?;
        tx.commit().await.map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(todo_id = created.id, "Todo created");
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, task, completed FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>> {
        let result = sqlx::query("SELECT id, task, completed FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        match result {
            Some(row) => Ok(Some(row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: i64, update: UpdateTodo) -> Result<Todo> {
        let mut tx = self.pool.begin().await.map_err(sqlx_error_to_todo_error)?;

        let row = sqlx::query(
            "UPDATE todos SET task = ?, completed = ? WHERE id = ? RETURNING id, task, completed",
        )
        .bind(&update.task)
        .bind(update.completed)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        let Some(row) = row else {
            return Err(TodoError::NotFound(id));
        };

        let updated = row_to_todo(&row)?;
        tx.commit().await.map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(todo_id = id, completed = updated.completed, "Todo updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(sqlx_error_to_todo_error)?;

        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id));
        }

        tx.commit().await.map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(todo_id = id, "Todo deleted");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(())
    }
}
