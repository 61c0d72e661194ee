use async_trait::async_trait;
use crate::{
    error::Result,
    models::{NewTodo, Todo, UpdateTodo},
};

/// Repository trait for todo persistence
///
/// Implementations must be thread-safe and support concurrent access. Each
/// write runs as a single unit of work against the store: it either commits
/// as a whole or leaves the store untouched, and any connection it holds is
/// returned to the pool on every exit path.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create a new todo
    ///
    /// # Returns
    /// * `Ok(Todo)` - The created todo with its assigned ID and `completed = false`
    /// * `Err(TodoError::Validation)` - If the task text is empty
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn create(&self, todo: NewTodo) -> Result<Todo>;

    /// List every todo in insertion order
    ///
    /// # Returns
    /// * `Ok(Vec<Todo>)` - All stored todos (may be empty)
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn list_all(&self) -> Result<Vec<Todo>>;

    /// Get a todo by its ID
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The todo if found
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>>;

    /// Overwrite the mutable fields of an existing todo
    ///
    /// # Returns
    /// * `Ok(Todo)` - The updated todo
    /// * `Err(TodoError::NotFound)` - If the todo doesn't exist
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn update(&self, id: i64, update: UpdateTodo) -> Result<Todo>;

    /// Delete a todo
    ///
    /// # Returns
    /// * `Ok(())` - The todo was removed
    /// * `Err(TodoError::NotFound)` - If the todo doesn't exist
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn delete(&self, id: i64) -> Result<()>;

    /// Verify the store is reachable
    async fn health_check(&self) -> Result<()>;
}
