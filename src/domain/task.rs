use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display format for `created_at`, e.g. "Oct 16, 2026, 02:30 PM"
pub const CREATED_AT_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// A single to-do record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID, assigned at creation and never reassigned
    pub id: String,
    /// Trimmed, non-empty task text
    pub text: String,
    /// Completion flag
    pub completed: bool,
    /// Human-readable creation timestamp
    pub created_at: String,
}

impl Task {
    /// Create a task from user input. Returns `None` when the input is blank.
    pub fn new(text: &str) -> Option<Self> {
        Self::new_at(text, Local::now())
    }

    /// Same as [`Task::new`] with an explicit creation time
    pub fn new_at<Tz: TimeZone>(text: &str, now: DateTime<Tz>) -> Option<Self>
    where
        Tz::Offset: std::fmt::Display,
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: format_created_at(&now),
        })
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Check the text invariant (used when adopting persisted records)
    pub fn has_valid_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// First eight characters of the id, for compact listings
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Render a timestamp in the fixed `created_at` format
pub fn format_created_at<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(CREATED_AT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_task_trims_text() {
        let task = Task::new("  Buy milk \n").unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_new_task_rejects_blank_input() {
        assert!(Task::new("").is_none());
        assert!(Task::new("   ").is_none());
        assert!(Task::new("\t\n").is_none());
    }

    #[test]
    fn test_new_tasks_get_distinct_ids() {
        let a = Task::new("a").unwrap();
        let b = Task::new("b").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_created_at_format() {
        let time = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap();
        assert_eq!(format_created_at(&time), "Oct 16, 2026, 02:05 PM");

        let morning = Utc.with_ymd_and_hms(2024, 1, 3, 9, 30, 0).unwrap();
        let task = Task::new_at("Walk dog", morning).unwrap();
        assert_eq!(task.created_at, "Jan 3, 2024, 09:30 AM");
    }

    #[test]
    fn test_toggle_flips_only_completed() {
        let mut task = Task::new("Read").unwrap();
        let before = task.clone();

        task.toggle();
        assert!(task.completed);
        assert_eq!(task.id, before.id);
        assert_eq!(task.text, before.text);
        assert_eq!(task.created_at, before.created_at);

        task.toggle();
        assert_eq!(task, before);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let task = Task {
            id: "1".to_string(),
            text: "Buy milk".to_string(),
            completed: true,
            created_at: "Oct 16, 2026, 02:05 PM".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], "Oct 16, 2026, 02:05 PM");
        assert_eq!(json["completed"], true);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_short_id() {
        let mut task = Task::new("x").unwrap();
        assert_eq!(task.short_id().len(), 8);
        task.id = "abc".to_string();
        assert_eq!(task.short_id(), "abc");
    }
}
