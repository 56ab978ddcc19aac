use crate::domain::{Filter, Task, UiMode};
use crate::persistence::Storage;
use crate::store::TaskStore;
use crate::theme::{SystemThemeSignal, ThemePreference};
use crate::ui::styles::Palette;
use tracing::info;

/// Main application state for the terminal UI
pub struct AppState {
    pub store: TaskStore<Storage>,
    pub theme: ThemePreference<Storage>,
    pub palette: Palette,
    pub ui_mode: UiMode,
    pub input: String,
    pub selected_index: usize, // Index into the visible tasks
}

impl AppState {
    /// Build the state and run both startup phases: load tasks, resolve theme
    pub fn new(storage: Storage, signal: Box<dyn SystemThemeSignal>) -> Self {
        let mut store = TaskStore::new(storage.clone());
        store.initialize();
        debug_assert!(store.is_initialized());

        let mut theme = ThemePreference::new(storage, signal);
        let mut palette = Palette::default();
        theme.resolve_initial(&mut palette);

        info!(
            tasks = store.tasks().len(),
            theme = theme.get().as_str(),
            "app state ready"
        );

        Self {
            store,
            theme,
            palette,
            ui_mode: UiMode::Normal,
            input: String::new(),
            selected_index: 0,
        }
    }

    /// Whether the stats and filter bars are shown
    pub fn has_tasks(&self) -> bool {
        self.store.counts().total > 0
    }

    /// Whether Enter would add a task
    pub fn can_add(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn start_input(&mut self) {
        self.ui_mode = UiMode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn input_add_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Add the typed text. The input is cleared only when a task was created.
    pub fn submit_input(&mut self) {
        if !self.can_add() {
            return;
        }
        self.store.add(&self.input);
        self.input.clear();
        self.selected_index = 0;
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.store.visible_tasks().get(self.selected_index).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        let visible = self.store.visible_tasks().len();
        if self.selected_index + 1 < visible {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside the visible list
    fn clamp_selection(&mut self) {
        let visible = self.store.visible_tasks().len();
        if visible == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= visible {
            self.selected_index = visible - 1;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle(&id);
            self.clamp_selection();
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.delete(&id);
            self.clamp_selection();
        }
    }

    pub fn clear_completed(&mut self) {
        self.store.clear_completed();
        self.clamp_selection();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) {
        let next = self.store.filter().next();
        self.set_filter(next);
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle(&mut self.palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;
    use crate::persistence::{KeyValueStore, MemoryStore, THEME_KEY};
    use crate::theme::NoThemeSignal;

    fn create_test_app() -> (AppState, MemoryStore) {
        let memory = MemoryStore::new();
        memory.set(THEME_KEY, "light").unwrap();
        let app = AppState::new(Storage::Memory(memory.clone()), Box::new(NoThemeSignal));
        (app, memory)
    }

    fn type_text(app: &mut AppState, text: &str) {
        app.start_input();
        for c in text.chars() {
            app.input_add_char(c);
        }
        app.submit_input();
    }

    #[test]
    fn test_app_state_new() {
        let (app, _) = create_test_app();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.store.is_initialized());
        assert!(app.theme.is_resolved());
        assert!(!app.has_tasks());
    }

    #[test]
    fn test_submit_input_adds_and_clears() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "Buy milk");

        assert!(app.input.is_empty());
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert_eq!(app.ui_mode, UiMode::Input);
        assert!(app.has_tasks());
    }

    #[test]
    fn test_blank_input_cannot_be_added() {
        let (mut app, memory) = create_test_app();
        let writes = memory.writes();

        app.start_input();
        app.input_add_char(' ');
        assert!(!app.can_add());
        app.submit_input();

        assert_eq!(app.input, " ");
        assert!(!app.has_tasks());
        assert_eq!(memory.writes(), writes);
    }

    #[test]
    fn test_input_backspace() {
        let (mut app, _) = create_test_app();
        app.input_add_char('a');
        app.input_add_char('b');
        app.input_backspace();
        assert_eq!(app.input, "a");
        app.input_backspace();
        app.input_backspace();
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_move_selection() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "a");
        type_text(&mut app, "b");

        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "a");
        type_text(&mut app, "b");
        app.move_selection_down();

        app.delete_selected();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_task().unwrap().text, "b");

        app.delete_selected();
        assert!(app.selected_task().is_none());
        app.delete_selected();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_under_active_filter_clamps() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "a");
        type_text(&mut app, "b");
        app.set_filter(Filter::Active);
        app.move_selection_down();

        app.toggle_selected();
        assert_eq!(app.store.visible_tasks().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.store.counts().completed, 1);
    }

    #[test]
    fn test_clear_completed_and_cycle_filter() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "a");
        app.toggle_selected();

        app.cycle_filter();
        assert_eq!(app.store.filter(), Filter::Active);
        app.cycle_filter();
        assert_eq!(app.store.filter(), Filter::Completed);

        app.clear_completed();
        assert!(!app.has_tasks());
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_toggle_theme_updates_palette_and_storage() {
        let (mut app, memory) = create_test_app();
        assert_eq!(app.palette.theme, Theme::Light);

        app.toggle_theme();
        assert_eq!(app.theme.get(), Theme::Dark);
        assert_eq!(app.palette.theme, Theme::Dark);
        assert_eq!(memory.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
