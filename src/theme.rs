//! Persisted light/dark preference.
//!
//! The preference reports `Theme::Light` until [`ThemePreference::resolve_initial`]
//! succeeds. Resolution prefers the value stored under [`THEME_KEY`] and
//! otherwise asks the injected [`SystemThemeSignal`], which is only
//! consulted when it reports itself available. Resolution happens once;
//! after that the theme only changes through [`ThemePreference::toggle`].

use crate::domain::Theme;
use crate::persistence::{KeyValueStore, THEME_KEY};
use tracing::{debug, warn};

/// Ambient color-scheme signal of the environment
pub trait SystemThemeSignal {
    /// Whether the environment can answer at all
    fn is_available(&self) -> bool;

    fn prefers_dark(&self) -> bool;
}

/// Receives the theme whenever it is resolved or toggled
pub trait ThemeSideEffectSink {
    fn apply(&mut self, theme: Theme);
}

impl ThemeSideEffectSink for () {
    fn apply(&mut self, _theme: Theme) {}
}

/// Signal for contexts with no color-scheme information
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThemeSignal;

impl SystemThemeSignal for NoThemeSignal {
    fn is_available(&self) -> bool {
        false
    }

    fn prefers_dark(&self) -> bool {
        false
    }
}

/// Reads the terminal's background hint from `COLORFGBG` ("fg;bg")
#[derive(Debug, Clone, Default)]
pub struct TerminalThemeSignal {
    colorfgbg: Option<String>,
}

impl TerminalThemeSignal {
    pub fn from_env() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }
}

impl SystemThemeSignal for TerminalThemeSignal {
    fn is_available(&self) -> bool {
        true
    }

    fn prefers_dark(&self) -> bool {
        self.colorfgbg
            .as_deref()
            .map(background_is_dark)
            .unwrap_or(false)
    }
}

/// Pick the signal for this process: the terminal when stdout is one, nothing otherwise
pub fn system_signal(interactive: bool) -> Box<dyn SystemThemeSignal> {
    if interactive {
        Box::new(TerminalThemeSignal::from_env())
    } else {
        Box::new(NoThemeSignal)
    }
}

/// Background index is the last field; 0-6 and 8 are the dark ANSI colours
fn background_is_dark(colorfgbg: &str) -> bool {
    colorfgbg
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .map(|bg| bg <= 6 || bg == 8)
        .unwrap_or(false)
}

pub struct ThemePreference<S> {
    storage: S,
    signal: Box<dyn SystemThemeSignal>,
    theme: Theme,
    resolved: bool,
}

impl<S: KeyValueStore> ThemePreference<S> {
    pub fn new(storage: S, signal: Box<dyn SystemThemeSignal>) -> Self {
        Self {
            storage,
            signal,
            theme: Theme::default(),
            resolved: false,
        }
    }

    pub fn get(&self) -> Theme {
        self.theme
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// One-time startup resolution. Returns whether the preference is resolved.
    pub fn resolve_initial(&mut self, sink: &mut dyn ThemeSideEffectSink) -> bool {
        if self.resolved {
            return true;
        }

        let theme = match self.stored_theme() {
            Some(theme) => theme,
            None if self.signal.is_available() => {
                if self.signal.prefers_dark() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            None => {
                debug!("no stored theme and no system signal, keeping default");
                return false;
            }
        };

        self.theme = theme;
        self.resolved = true;
        sink.apply(theme);
        debug!(theme = theme.as_str(), "theme resolved");
        true
    }

    fn stored_theme(&self) -> Option<Theme> {
        match self.storage.get(THEME_KEY) {
            Ok(Some(value)) => {
                let theme = Theme::from_stored(&value);
                if theme.is_none() {
                    debug!(value = %value, "ignoring unrecognized stored theme");
                }
                theme
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored theme");
                None
            }
        }
    }

    /// Flip the theme, persist it and apply it. No-op before resolution.
    pub fn toggle(&mut self, sink: &mut dyn ThemeSideEffectSink) -> Theme {
        if !self.resolved {
            warn!("theme toggle called before the preference was resolved");
            return self.theme;
        }

        self.theme = self.theme.toggled();
        if let Err(e) = self.storage.set(THEME_KEY, self.theme.as_str()) {
            warn!(error = %e, "could not persist theme");
        }
        sink.apply(self.theme);
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    struct FakeSignal {
        available: bool,
        dark: bool,
    }

    impl SystemThemeSignal for FakeSignal {
        fn is_available(&self) -> bool {
            self.available
        }

        fn prefers_dark(&self) -> bool {
            assert!(self.available, "signal consulted while unavailable");
            self.dark
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        applied: Vec<Theme>,
    }

    impl ThemeSideEffectSink for RecordingSink {
        fn apply(&mut self, theme: Theme) {
            self.applied.push(theme);
        }
    }

    fn preference(
        storage: &MemoryStore,
        available: bool,
        dark: bool,
    ) -> ThemePreference<MemoryStore> {
        ThemePreference::new(storage.clone(), Box::new(FakeSignal { available, dark }))
    }

    #[test]
    fn test_default_before_resolution() {
        let storage = MemoryStore::new();
        let pref = preference(&storage, true, true);
        assert_eq!(pref.get(), Theme::Light);
        assert!(!pref.is_resolved());
    }

    #[test]
    fn test_stored_value_wins_over_signal() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "dark").unwrap();

        for (available, dark) in [(true, false), (true, true), (false, false)] {
            let mut pref = preference(&storage, available, dark);
            assert!(pref.resolve_initial(&mut ()));
            assert_eq!(pref.get(), Theme::Dark);
        }
    }

    #[test]
    fn test_signal_used_without_stored_value() {
        let storage = MemoryStore::new();
        let mut sink = RecordingSink::default();

        let mut pref = preference(&storage, true, true);
        assert!(pref.resolve_initial(&mut sink));
        assert_eq!(pref.get(), Theme::Dark);
        assert_eq!(sink.applied, vec![Theme::Dark]);
        // Resolution itself does not write
        assert_eq!(storage.writes(), 0);

        assert_eq!(pref.toggle(&mut sink), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(sink.applied, vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_unrecognized_stored_value_falls_back_to_signal() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "solarized").unwrap();

        let mut pref = preference(&storage, true, false);
        assert!(pref.resolve_initial(&mut ()));
        assert_eq!(pref.get(), Theme::Light);
    }

    #[test]
    fn test_unavailable_signal_stays_unresolved() {
        let storage = MemoryStore::new();
        let mut sink = RecordingSink::default();

        let mut pref = preference(&storage, false, true);
        assert!(!pref.resolve_initial(&mut sink));
        assert_eq!(pref.get(), Theme::Light);
        assert!(sink.applied.is_empty());

        // Toggle before resolution is a silent no-op
        assert_eq!(pref.toggle(&mut sink), Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap(), None);
        assert!(sink.applied.is_empty());
    }

    #[test]
    fn test_resolve_is_not_reentered() {
        let storage = MemoryStore::new();
        let mut pref = preference(&storage, true, false);
        assert!(pref.resolve_initial(&mut ()));
        assert_eq!(pref.toggle(&mut ()), Theme::Dark);

        storage.set(THEME_KEY, "light").unwrap();
        assert!(pref.resolve_initial(&mut ()));
        assert_eq!(pref.get(), Theme::Dark);
    }

    #[test]
    fn test_toggle_survives_unavailable_storage() {
        let storage = MemoryStore::new();
        let mut pref = preference(&storage, true, false);
        pref.resolve_initial(&mut ());

        storage.set_unavailable(true);
        assert_eq!(pref.toggle(&mut ()), Theme::Dark);
        assert_eq!(pref.get(), Theme::Dark);
    }

    #[test]
    fn test_background_is_dark() {
        assert!(background_is_dark("15;0"));
        assert!(background_is_dark("7;default;8"));
        assert!(!background_is_dark("0;15"));
        assert!(!background_is_dark("0;7"));
        assert!(!background_is_dark("garbage"));
    }

    #[test]
    fn test_terminal_signal_reads_background() {
        let signal = TerminalThemeSignal {
            colorfgbg: Some("15;0".to_string()),
        };
        assert!(signal.is_available());
        assert!(signal.prefers_dark());

        let signal = TerminalThemeSignal { colorfgbg: None };
        assert!(signal.is_available());
        assert!(!signal.prefers_dark());
    }

    #[test]
    fn test_system_signal_without_terminal_is_unavailable() {
        assert!(!system_signal(false).is_available());
        assert!(system_signal(true).is_available());

        // Piped output never resolves from the signal, even with a dark hint around
        let storage = MemoryStore::new();
        let mut pref = ThemePreference::new(storage.clone(), system_signal(false));
        assert!(!pref.resolve_initial(&mut ()));
        assert_eq!(pref.get(), Theme::Light);
    }

    #[test]
    fn test_unreadable_storage_falls_back_to_signal() {
        let storage = MemoryStore::new();
        storage.set(THEME_KEY, "light").unwrap();
        storage.set_unavailable(true);
        let mut sink = RecordingSink::default();

        let mut pref = preference(&storage, true, true);
        assert!(pref.resolve_initial(&mut sink));
        assert_eq!(pref.get(), Theme::Dark);
        assert_eq!(sink.applied, vec![Theme::Dark]);

        let mut pref = preference(&storage, false, true);
        assert!(!pref.resolve_initial(&mut ()));
        assert_eq!(pref.get(), Theme::Light);
    }
}
