//! Database crate for the todo service
//!
//! This crate provides the SQLite implementation of the TodoRepository trait.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file databases
//! - Embedded migration creating the `todos` table on startup
//! - Connection pooling with one transaction per write
//! - In-memory databases for tests
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTodoRepository;
//! use todo_core::repository::TodoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTodoRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     repo.health_check().await?;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{PoolSettings, SqliteTodoRepository};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo, UpdateTodo},
    repository::TodoRepository,
};
