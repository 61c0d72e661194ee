//! Mock implementation of TodoRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Store-like id assignment (monotonic, never reused)

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};
use todo_core::{NewTodo, Result, Todo, TodoError, TodoRepository, UpdateTodo};

/// Mock implementation of TodoRepository for testing
pub struct MockTodoRepository {
    todos: Arc<Mutex<BTreeMap<i64, Todo>>>,
    next_id: Arc<AtomicI64>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_next_id(1)
    }

    /// Create mock repository with pre-populated todos
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let max_id = todos.iter().map(|t| t.id).max().unwrap_or(0);
        let todo_map = todos.into_iter().map(|t| (t.id, t)).collect();

        Self {
            todos: Arc::new(Mutex::new(todo_map)),
            next_id: Arc::new(AtomicI64::new(max_id + 1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create mock repository with specific starting ID
    pub fn with_next_id(next_id: i64) -> Self {
        Self {
            todos: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(next_id)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Snapshot of the stored todos in id order
    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos.lock().values().cloned().collect()
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.contains(method)),
            "Method '{}' was called unexpectedly. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        if let Some(error) = self.error_injection.lock().take() {
            return Err(error);
        }
        Ok(())
    }

    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo> {
        self.record_call_with_params("create", &format!("task={}", todo.task));
        self.check_error_injection()?;

        if todo.task.trim().is_empty() {
            return Err(TodoError::empty_field("task"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Todo::new(id, todo.task, false);
        self.todos.lock().insert(id, created.clone());

        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Todo>> {
        self.record_call("list_all");
        self.check_error_injection()?;

        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>> {
        self.record_call_with_params("find_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.todos.lock().get(&id).cloned())
    }

    async fn update(&self, id: i64, update: UpdateTodo) -> Result<Todo> {
        self.record_call_with_params("update", &format!("id={id}"));
        self.check_error_injection()?;

        let mut todos = self.todos.lock();
        let todo = todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        todo.apply(update);

        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record_call_with_params("delete", &format!("id={id}"));
        self.check_error_injection()?;

        self.todos
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoError::NotFound(id))
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check");
        self.check_error_injection()
    }
}
