use crate::app::AppState;
use crate::domain::UiMode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Paragraph,
    },
    Frame,
};

const PLACEHOLDER: &str = "What needs to be done?";

/// Render the new-task input box
pub fn render_input_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let palette = &app.palette;
    let editing = app.ui_mode == UiMode::Input;

    let mut spans = vec![Span::raw("> ")];
    if app.input.is_empty() && !editing {
        spans.push(Span::styled(PLACEHOLDER, palette.muted_style()));
    } else {
        spans.push(Span::raw(app.input.as_str()));
    }
    if editing {
        spans.push(Span::styled("█", palette.title_style())); // Cursor
    }

    // "Add" hint is dimmed while the input is blank
    let add_hint = if app.can_add() {
        Span::styled(" Enter: Add ", palette.title_style())
    } else {
        Span::styled(" Enter: Add ", palette.muted_style())
    };

    let border = if editing {
        palette.title_style()
    } else {
        palette.border_style()
    };

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Span::styled(" New task ", palette.title_style()))
                .title(
                    Title::from(add_hint)
                        .alignment(Alignment::Right)
                        .position(Position::Bottom),
                ),
        )
        .style(palette.default_style());

    f.render_widget(paragraph, area);
}
