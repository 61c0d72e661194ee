//! Todo Server Library
//!
//! Process bootstrap for the todo HTTP service: layered configuration,
//! telemetry (stdout plus an append-only log file), database setup and
//! server construction. The `todo-server` binary wires these together.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_repository, create_server, ensure_database_directory, initialize_app};
pub use telemetry::init_telemetry;
