use crate::domain::Theme;
use crate::theme::ThemeSideEffectSink;
use ratatui::style::{Color, Modifier, Style};

/// Colour palette for the current theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub theme: Theme,
    background: Color,
    foreground: Color,
    muted: Color,
    accent: Color,
    border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                theme,
                background: Color::White,
                foreground: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                theme,
                background: Color::Black,
                foreground: Color::White,
                muted: Color::DarkGray,
                accent: Color::LightBlue,
                border: Color::DarkGray,
            },
        }
    }

    /// Default text style
    pub fn default_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Selected row highlight style
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style for panes
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Secondary text (timestamps, tagline, hints)
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Completed task text
    pub fn done_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn check_style(&self) -> Style {
        Style::default().fg(Color::Green)
    }

    /// Active filter tab
    pub fn active_tab_style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    }

    /// Stat bullets: total, active, completed
    pub fn total_style(&self) -> Style {
        Style::default().fg(Color::Blue)
    }

    pub fn active_style(&self) -> Style {
        Style::default().fg(Color::Rgb(249, 115, 22))
    }

    pub fn completed_style(&self) -> Style {
        Style::default().fg(Color::Green)
    }

    /// "Clear completed" hint
    pub fn danger_style(&self) -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

impl ThemeSideEffectSink for Palette {
    fn apply(&mut self, theme: Theme) {
        *self = Self::for_theme(theme);
    }
}
