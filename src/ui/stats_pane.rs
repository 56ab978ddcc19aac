use crate::app::AppState;
use crate::domain::Filter;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render counts and filter tabs (only shown while there are tasks)
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let palette = &app.palette;
    let counts = app.store.counts();
    let current = app.store.filter();

    let mut spans = vec![
        Span::styled("● ", palette.total_style()),
        Span::raw(format!("Total: {}   ", counts.total)),
        Span::styled("● ", palette.active_style()),
        Span::raw(format!("Active: {}   ", counts.active)),
        Span::styled("● ", palette.completed_style()),
        Span::raw(format!("Completed: {}", counts.completed)),
        Span::raw("   │  "),
    ];

    for (i, filter) in Filter::all().iter().enumerate() {
        let label = format!(" {} {} ", i + 1, filter.label());
        if *filter == current {
            spans.push(Span::styled(label, palette.active_tab_style()));
        } else {
            spans.push(Span::styled(label, palette.muted_style()));
        }
        spans.push(Span::raw(" "));
    }

    if counts.completed > 0 {
        spans.push(Span::styled("  c Clear completed", palette.danger_style()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_style()),
        )
        .style(palette.default_style());

    f.render_widget(paragraph, area);
}
