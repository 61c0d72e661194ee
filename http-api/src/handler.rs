//! Todo Handler
//!
//! Implements the TodoProtocol trait on top of a TodoRepository.

use ::todo_core::error::Result;
use ::todo_core::{
    AddTodoParams, DeleteTodoParams, EditTodoParams, NewTodo, Todo, TodoProtocol, TodoRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Bridges the HTTP routes with a TodoRepository
///
/// Holds no per-request state; every call is a single repository operation.
pub struct TodoHandler<R> {
    repository: Arc<R>,
}

impl<R> TodoHandler<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> Clone for TodoHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

#[async_trait]
impl<R: TodoRepository> TodoProtocol for TodoHandler<R> {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        self.repository.list_all().await
    }

    async fn add_todo(&self, params: AddTodoParams) -> Result<Todo> {
        self.repository.create(NewTodo::new(params.task)).await
    }

    async fn edit_todo(&self, params: EditTodoParams) -> Result<Todo> {
        let (id, update) = params.into_update();
        self.repository.update(id, update).await
    }

    async fn delete_todo(&self, params: DeleteTodoParams) -> Result<()> {
        self.repository.delete(params.todo_id).await
    }
}
