use crate::app::AppState;
use crate::domain::{Filter, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Input => handle_input_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,

        KeyCode::Char('a') | KeyCode::Char('i') => app.start_input(),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        // Filters
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Completed),
        KeyCode::Tab => app.cycle_filter(),

        KeyCode::Char('c') => app.clear_completed(),
        KeyCode::Char('t') => app.toggle_theme(),

        _ => {}
    }
    false
}

/// Handle keys while typing a new task
fn handle_input_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
    false
}
