use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error types for the todo service.
///
/// Store implementations report an absent record through [`TodoError::NotFound`]
/// so callers can branch on the variant instead of inspecting message text.
/// Each variant maps to the HTTP status code the API layer responds with.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::NotFound(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let db = TodoError::Database("disk I/O error".to_string());
/// assert_eq!(db.status_code(), 500);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo exists with the given id
    #[error("Todo with ID {0} not found")]
    NotFound(i64),

    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a validation error for an empty field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TodoError::Database(_))
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::NotFound(_) => 404,
            TodoError::Validation(_) => 422,
            TodoError::Database(_) => 500,
            TodoError::Configuration(_) => 500,
            TodoError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = TodoError::NotFound(42);
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), 404);

        let error = TodoError::empty_field("task");
        assert_eq!(
            error,
            TodoError::Validation("Field 'task' cannot be empty".to_string())
        );
        assert!(error.is_validation());
        assert_eq!(error.status_code(), 422);
    }

    #[test]
    fn test_error_display() {
        let error = TodoError::NotFound(99);
        assert_eq!(format!("{error}"), "Todo with ID 99 not found");

        let error = TodoError::Database("no such table: todos".to_string());
        assert_eq!(format!("{error}"), "Database error: no such table: todos");
    }

    #[test]
    fn test_error_predicates() {
        assert!(TodoError::NotFound(1).is_not_found());
        assert!(!TodoError::Database("test".to_string()).is_not_found());

        assert!(TodoError::Database("test".to_string()).is_database());
        assert!(!TodoError::Internal("test".to_string()).is_database());

        assert_eq!(TodoError::Internal("boom".to_string()).status_code(), 500);
        assert_eq!(TodoError::Configuration("bad".to_string()).status_code(), 500);
    }
}
