use anyhow::{Context, Result};
use database::{PoolSettings, SqliteTodoRepository, TodoRepository};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use todo_api::TodoServer;
use tracing::info;

use crate::config::Config;

/// Open the pool, create the schema and verify the store answers
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTodoRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let settings = PoolSettings {
        max_connections: config.database.max_connections,
        acquire_timeout: Duration::from_secs(config.database.connection_timeout),
    };

    let repo = SqliteTodoRepository::with_settings(database_url, settings)
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    repo.health_check()
        .await
        .context("Database health check failed")?;

    info!("Todo repository created successfully");
    Ok(Arc::new(repo))
}

/// Create the HTTP server around a repository
pub fn create_server(repository: Arc<SqliteTodoRepository>) -> TodoServer<SqliteTodoRepository> {
    TodoServer::new(repository)
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<TodoServer<SqliteTodoRepository>> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository);

    info!("Application initialized successfully");
    Ok(server)
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    ensure_database_directory(config.database_url())
}

/// Create the parent directory of a file database if it is missing
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if db_path.is_empty() || db_path.starts_with(":memory:") {
        return Ok(());
    }

    // Drop connection options such as ?mode=rwc
    let db_path = db_path.split('?').next().unwrap_or(db_path);

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            // Owner only
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    Ok(())
}
