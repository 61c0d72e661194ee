//! Mock implementations and test utilities for the todo service
//!
//! - In-memory [`MockTodoRepository`] with error injection and call tracking
//! - Standard fixtures
//! - Random data generators and property-based testing strategies

pub mod fixtures;
pub mod generators;
pub mod repository;

pub use fixtures::*;
pub use generators::*;
pub use repository::MockTodoRepository;
