use crate::app::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the title, tagline and theme indicator
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let palette = &app.palette;
    let theme = app.theme.get();

    let lines = vec![
        Line::from(vec![
            Span::styled("Todo App", palette.title_style()),
            Span::raw("  "),
            Span::styled(
                format!("{} {}", theme.symbol(), theme.as_str()),
                palette.muted_style(),
            ),
        ]),
        Line::from(Span::styled(
            "Organize your tasks beautifully",
            palette.muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(palette.default_style());
    f.render_widget(paragraph, area);
}
