//! Todo HTTP API
//!
//! axum routes for the todo operations, plus the middleware that tags each
//! request with a correlation id and writes its access line.
//!
//! # Overview
//!
//! - [`server`] builds the router and runs the listener
//! - [`handler`] implements [`todo_core::TodoProtocol`] over a repository
//! - [`request_logger`] correlation ids, timing and log line formats
//! - [`error`] maps core errors to HTTP responses
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_api::TodoServer;
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let repository = Arc::new(database::SqliteTodoRepository::new("todos.db").await?);
//!     repository.migrate().await?;
//!
//!     let server = TodoServer::new(repository);
//!     server.serve("127.0.0.1:8000", std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handler;
pub mod request_logger;
pub mod server;

// Re-export key types for easier usage
pub use error::{ApiError, NOT_FOUND_MESSAGE};
pub use handler::TodoHandler;
pub use request_logger::{HandlerPanic, RequestContext, CORRELATION_ID_HEADER};
pub use server::{MessageResponse, TodoServer};

// Re-export core types for external consumers
pub use todo_core::{Todo, TodoError, TodoProtocol, TodoRepository};
