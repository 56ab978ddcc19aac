use crate::domain::Task;
use std::collections::HashSet;

/// Storage key holding the JSON task array
pub const TODOS_KEY: &str = "todos";

/// Storage key holding "light" or "dark"
pub const THEME_KEY: &str = "theme";

/// Serialize the full collection as a JSON array of task records
pub fn encode_tasks(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parse a JSON array of task records. Anything else is an error.
pub fn decode_tasks(raw: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(raw)
}

/// Drop records that break the collection invariants: blank text or an id seen earlier.
/// Returns the kept tasks and the number dropped.
pub fn sanitize_tasks(tasks: Vec<Task>) -> (Vec<Task>, usize) {
    let mut seen = HashSet::new();
    let before = tasks.len();

    let kept: Vec<Task> = tasks
        .into_iter()
        .filter(|task| task.has_valid_text() && seen.insert(task.id.clone()))
        .collect();

    let dropped = before - kept.len();
    (kept, dropped)
}
