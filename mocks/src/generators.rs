//! Random test data generators using the fake crate
//!
//! Also provides a proptest strategy for task text.

use fake::faker::lorem::en::Sentence;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::Todo;

/// Generate a realistic task description
pub fn generate_task_text() -> String {
    Sentence(2..6).fake()
}

/// Generate a random todo with realistic data
pub fn generate_random_todo() -> Todo {
    let id: i64 = (1..99999).fake();
    Todo::new(id, generate_task_text(), rand::thread_rng().gen_bool(0.5))
}

/// Proptest strategy for task text the service accepts: at least one
/// non-whitespace character
pub fn task_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,!?&=%+#/-]{0,60}"
}
