//! Todo Core Library
//!
//! Domain model, error taxonomy and trait interfaces for the todo service.
//! The database and HTTP crates depend on the types defined here.
//!
//! - [`models`] - The `Todo` record and its create/update inputs
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`protocol`] - Operation trait and request parameters for the API layer
//!
//! # Example
//!
//! ```rust
//! use todo_core::{EditTodoParams, UpdateTodo};
//!
//! let params = EditTodoParams {
//!     todo_id: 1,
//!     task: "Buy bread".to_string(),
//!     completed: true,
//! };
//! let (id, update) = params.into_update();
//! assert_eq!(id, 1);
//! assert_eq!(update, UpdateTodo::new("Buy bread", true));
//! ```

pub mod error;
pub mod models;
pub mod protocol;
pub mod repository;

pub use error::{Result, TodoError};
pub use models::{NewTodo, Todo, UpdateTodo};
pub use protocol::{
    parse_lenient_bool, AddTodoParams, DeleteTodoParams, EditTodoParams, TodoProtocol,
};
pub use repository::TodoRepository;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
