/// View predicate applied to the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Parse filter from its lower-case name like "active"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Lower-case name, as used on the command line and in messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Capitalized label for filter tabs
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Whether a task with the given completion flag passes this filter
    pub fn matches(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Next filter in tab order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::All,
        }
    }

    /// Get all filters in display order
    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }
}

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a persisted theme value. Only the exact strings "light" and "dark" are accepted.
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Value written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Indicator glyph for the header
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Light => "☀",
            Self::Dark => "☾",
        }
    }
}

/// UI mode for the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Input, // Typing a new task
}
