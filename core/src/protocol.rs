use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize};
use crate::{
    error::Result,
    models::{Todo, UpdateTodo},
};

/// Transport-agnostic set of todo operations
///
/// The HTTP layer decodes request parameters into the types below and calls
/// these methods; implementations translate them into repository calls.
#[async_trait]
pub trait TodoProtocol: Send + Sync {
    /// Return every todo
    async fn list_todos(&self) -> Result<Vec<Todo>>;

    /// Create a todo from the given task text
    async fn add_todo(&self, params: AddTodoParams) -> Result<Todo>;

    /// Overwrite an existing todo's task text and completion flag
    async fn edit_todo(&self, params: EditTodoParams) -> Result<Todo>;

    /// Remove an existing todo
    async fn delete_todo(&self, params: DeleteTodoParams) -> Result<()>;
}

/// Parameters for adding a todo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddTodoParams {
    pub task: String,
}

/// Parameters for editing a todo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditTodoParams {
    pub todo_id: i64,
    pub task: String,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub completed: bool,
}

impl EditTodoParams {
    /// Split into the target id and the update payload
    pub fn into_update(self) -> (i64, UpdateTodo) {
        (self.todo_id, UpdateTodo::new(self.task, self.completed))
    }
}

/// Parameters for deleting a todo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteTodoParams {
    pub todo_id: i64,
}

/// Parse a boolean written the way HTML forms and query strings spell it.
///
/// Accepts `true/false`, `1/0`, `yes/no`, `on/off`, `t/f` and `y/n`, ignoring case.
pub fn parse_lenient_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn deserialize_lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientBool;

    impl de::Visitor<'_> for LenientBool {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean such as true, false, 1, 0, yes, no, on or off")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<bool, E> {
            parse_lenient_bool(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(LenientBool)
}
