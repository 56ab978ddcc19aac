use crate::app::AppState;
use crate::domain::UiMode;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::Input => Line::from(vec![
            Span::raw(" type to edit   "),
            Span::raw("Enter add   "),
            Span::raw("Backspace delete char   "),
            Span::raw("Esc done"),
        ]),
        UiMode::Normal => Line::from(vec![
            Span::raw(" a add   "),
            Span::raw("↑/↓ select   "),
            Span::raw("Space toggle   "),
            Span::raw("d delete   "),
            Span::raw("1/2/3 Tab filter   "),
            Span::raw("c clear done   "),
            Span::raw("t theme   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(app.palette.muted_style());
    f.render_widget(paragraph, area);
}
