use serde::{Deserialize, Serialize};

/// A single entry on the todo list.
///
/// The `id` is assigned by the store when the record is created and never
/// changes afterwards. Only `task` and `completed` are mutable.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::Todo;
///
/// let todo = Todo::new(1, "Buy milk".to_string(), false);
/// let json = serde_json::to_string(&todo).unwrap();
/// assert_eq!(json, r#"{"id":1,"task":"Buy milk","completed":false}"#);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Store-assigned primary key
    pub id: i64,
    /// Free-text description of the work
    pub task: String,
    /// Whether the work is finished
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, task: String, completed: bool) -> Self {
        Self {
            id,
            task,
            completed,
        }
    }

    /// Apply an update to the mutable fields, leaving the id untouched
    pub fn apply(&mut self, update: UpdateTodo) {
        self.task = update.task;
        self.completed = update.completed;
    }
}

/// Data transfer object for creating new todos
///
/// New records always start with `completed = false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub task: String,
}

impl NewTodo {
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

/// Full overwrite of a todo's mutable fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

impl UpdateTodo {
    pub fn new(task: impl Into<String>, completed: bool) -> Self {
        Self {
            task: task.into(),
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_serialization_shape() {
        let todo = Todo::new(7, "Write report".to_string(), true);
        let value = serde_json::to_value(&todo).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["task"], "Write report");
        assert_eq!(value["completed"], true);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut todo = Todo::new(3, "Buy milk".to_string(), false);
        todo.apply(UpdateTodo::new("Buy bread", true));

        assert_eq!(todo.id, 3);
        assert_eq!(todo.task, "Buy bread");
        assert!(todo.completed);
    }

    #[test]
    fn test_update_todo_completed_defaults_to_false() {
        let update: UpdateTodo = serde_json::from_str(r#"{"task":"Walk dog"}"#).unwrap();
        assert_eq!(update, UpdateTodo::new("Walk dog", false));
    }
}
