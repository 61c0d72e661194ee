//! Standard test fixtures for consistent testing

use todo_core::Todo;

/// Create a basic open todo
pub fn create_test_todo() -> Todo {
    Todo::new(1, "Buy milk".to_string(), false)
}

/// Create a todo with a specific completion flag
pub fn create_test_todo_with_status(completed: bool) -> Todo {
    let mut todo = create_test_todo();
    todo.completed = completed;
    todo
}

/// Create multiple todos with ids `1..=count`; every third one is completed
pub fn create_test_todos(count: usize) -> Vec<Todo> {
    (1..=count)
        .map(|i| Todo::new(i as i64, format!("Test todo {i}"), i % 3 == 0))
        .collect()
}

/// Task strings that exercise encoding on the way through the query string
pub fn awkward_task_strings() -> Vec<&'static str> {
    vec![
        "Buy milk",
        "Pay rent & bills",
        "100% done?",
        "Réserver une table",
        "emoji 🚀 launch",
        "quote \"this\"",
        "a=b&c=d",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_todos() {
        let todos = create_test_todos(6);
        assert_eq!(todos.len(), 6);
        assert_eq!(todos[0].id, 1);
        assert_eq!(todos.iter().filter(|t| t.completed).count(), 2);
    }

    #[test]
    fn test_status_fixture() {
        assert!(create_test_todo_with_status(true).completed);
        assert!(!create_test_todo().completed);
    }
}
