pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Filter, Theme, UiMode};
pub use task::Task;
pub use views::{check_mark, compute_counts, empty_message, filter_tasks, Counts};
