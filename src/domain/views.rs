use super::enums::Filter;
use super::task::Task;

/// Task totals over the full collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Count tasks by completion state
pub fn compute_counts(tasks: &[Task]) -> Counts {
    let completed = tasks.iter().filter(|t| t.completed).count();
    Counts {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}

/// Tasks passing `filter`, in collection order
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t.completed)).collect()
}

/// Message shown in place of an empty list
pub fn empty_message(total: usize, filter: Filter) -> String {
    if total == 0 {
        "No tasks yet. Add one above to get started!".to_string()
    } else {
        format!("No {} tasks", filter.name())
    }
}

/// Check mark for the list
pub fn check_mark(completed: bool) -> &'static str {
    if completed {
        "[✓]"
    } else {
        "[ ]"
    }
}
