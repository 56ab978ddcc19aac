use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub input_area: Rect,
    pub stats_area: Option<Rect>,
    pub list_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout, top to bottom:
/// header (2 rows), input box (3), stats + filters (3, only with tasks),
/// task list (rest), keybindings bar (1)
pub fn create_layout(area: Rect, show_stats: bool) -> MainLayout {
    let mut constraints = vec![Constraint::Length(2), Constraint::Length(3)];
    if show_stats {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if show_stats {
        MainLayout {
            header_area: chunks[0],
            input_area: chunks[1],
            stats_area: Some(chunks[2]),
            list_area: chunks[3],
            keybindings_area: chunks[4],
        }
    } else {
        MainLayout {
            header_area: chunks[0],
            input_area: chunks[1],
            stats_area: None,
            list_area: chunks[2],
            keybindings_area: chunks[3],
        }
    }
}
