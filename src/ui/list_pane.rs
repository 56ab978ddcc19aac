use crate::app::AppState;
use crate::domain::{check_mark, empty_message, Task, UiMode};
use crate::ui::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Two-line list entry: check mark and text, then the creation time
fn task_item<'a>(task: &'a Task, palette: &Palette) -> ListItem<'a> {
    let text_style = if task.completed {
        palette.done_style()
    } else {
        palette.default_style()
    };

    let first = Line::from(vec![
        Span::styled(check_mark(task.completed), palette.check_style()),
        Span::raw(" "),
        Span::styled(task.text.as_str(), text_style),
    ]);
    let second = Line::from(Span::styled(
        format!("    Created: {}", task.created_at),
        palette.muted_style(),
    ));

    ListItem::new(vec![first, second])
}

/// Render the filtered task list, or the empty-state message
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let palette = &app.palette;
    let filter = app.store.filter();
    let visible = app.store.visible_tasks();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(
            format!(" {} ", filter.label()),
            palette.title_style(),
        ));

    if visible.is_empty() {
        let message = empty_message(app.store.counts().total, filter);
        let paragraph = Paragraph::new(Line::from(Span::styled(message, palette.muted_style())))
            .alignment(Alignment::Center)
            .block(block)
            .style(palette.default_style());
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|t| task_item(t, palette)).collect();

    // No highlight while typing, the input box has focus
    let mut state = ListState::default();
    if app.ui_mode == UiMode::Normal {
        state.select(Some(app.selected_index));
    }

    let list = List::new(items)
        .block(block)
        .style(palette.default_style())
        .highlight_style(palette.selected_style())
        .highlight_symbol("▸ ");

    f.render_stateful_widget(list, area, &mut state);
}
