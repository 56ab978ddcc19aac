pub mod header;
pub mod input_bar;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod stats_pane;
pub mod styles;

use crate::app::AppState;
use header::render_header;
use input_bar::render_input_bar;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::{widgets::Block, Frame};
use stats_pane::render_stats_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.has_tasks());

    // Paint the theme background first
    f.render_widget(Block::default().style(app.palette.default_style()), size);

    render_header(f, app, layout.header_area);
    render_input_bar(f, app, layout.input_area);

    if let Some(stats_area) = layout.stats_area {
        render_stats_pane(f, app, stats_area);
    }

    render_list_pane(f, app, layout.list_area);
    render_keybindings(f, app, layout.keybindings_area);
}
