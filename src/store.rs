//! Task collection, filter selection and their persistence.
//!
//! The store follows a two-phase lifecycle: it is created empty and
//! uninitialized, [`TaskStore::initialize`] reads the persisted collection
//! once, and only from then on does every mutation write the full
//! collection back under [`TODOS_KEY`]. Persistence failures are logged and
//! swallowed; the in-memory collection stays authoritative.

use crate::domain::{compute_counts, filter_tasks, Counts, Filter, Task};
use crate::persistence::{decode_tasks, encode_tasks, sanitize_tasks, KeyValueStore, TODOS_KEY};
use tracing::{debug, warn};

/// Visible state after an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub tasks: Vec<&'a Task>,
    pub counts: Counts,
    pub filter: Filter,
}

/// Result of looking a task up by id or id prefix
#[derive(Debug, PartialEq)]
pub enum IdMatch<'a> {
    None,
    Unique(&'a Task),
    Ambiguous(usize),
}

pub struct TaskStore<S> {
    storage: S,
    tasks: Vec<Task>,
    filter: Filter,
    initialized: bool,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
            filter: Filter::default(),
            initialized: false,
        }
    }

    /// Load the persisted collection. Enables persistence afterwards.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!("task store already initialized");
            return;
        }

        if let Some(tasks) = self.load() {
            self.tasks = tasks;
        }
        self.initialized = true;
        debug!(count = self.tasks.len(), "task store initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn load(&self) -> Option<Vec<Task>> {
        let raw = match self.storage.get(TODOS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted tasks");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted tasks, starting empty");
                return None;
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                let (tasks, dropped) = sanitize_tasks(tasks);
                if dropped > 0 {
                    warn!(dropped, "dropped invalid task records");
                }
                Some(tasks)
            }
            Err(e) => {
                warn!(error = %e, "persisted tasks are malformed, starting empty");
                None
            }
        }
    }

    /// Write the full collection. No-op until initialized.
    fn persist(&self) {
        if !self.initialized {
            debug!("skipping task write before initialization");
            return;
        }

        let raw = match encode_tasks(&self.tasks) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "could not encode tasks");
                return;
            }
        };

        if let Err(e) = self.storage.set(TODOS_KEY, &raw) {
            warn!(error = %e, "could not persist tasks");
        }
    }

    /// Add a task with the trimmed `text` as the newest entry. Blank input is ignored.
    pub fn add(&mut self, text: &str) -> Snapshot<'_> {
        if let Some(task) = Task::new(text) {
            debug!(id = %task.id, "task added");
            self.tasks.insert(0, task);
            self.persist();
        }
        self.snapshot()
    }

    /// Flip completion of the task with `id`
    pub fn toggle(&mut self, id: &str) -> Snapshot<'_> {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.toggle();
        }
        self.persist();
        self.snapshot()
    }

    pub fn delete(&mut self, id: &str) -> Snapshot<'_> {
        self.tasks.retain(|t| t.id != id);
        self.persist();
        self.snapshot()
    }

    /// Remove every completed task
    pub fn clear_completed(&mut self) -> Snapshot<'_> {
        self.tasks.retain(|t| !t.completed);
        self.persist();
        self.snapshot()
    }

    pub fn set_filter(&mut self, filter: Filter) -> Snapshot<'_> {
        self.filter = filter;
        self.snapshot()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Full collection, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look a task up by exact id, falling back to a unique id prefix
    pub fn find_by_prefix(&self, prefix: &str) -> IdMatch<'_> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return IdMatch::None;
        }
        if let Some(task) = self.get(prefix) {
            return IdMatch::Unique(task);
        }

        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(prefix));
        match (matches.next(), matches.count()) {
            (None, _) => IdMatch::None,
            (Some(task), 0) => IdMatch::Unique(task),
            (Some(_), rest) => IdMatch::Ambiguous(rest + 1),
        }
    }

    /// Collection filtered by the current filter, order preserved
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, self.filter)
    }

    /// Counts over the full collection, ignoring the filter
    pub fn counts(&self) -> Counts {
        compute_counts(&self.tasks)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tasks: self.visible_tasks(),
            counts: self.counts(),
            filter: self.filter,
        }
    }
}
