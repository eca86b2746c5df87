use std::fmt;
use std::str::FromStr;

use crate::storage::KeyValueStore;

/// Key the preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Toggle button glyph: the mode a press would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            ThemePreference::Light => "☾",
            ThemePreference::Dark => "☀",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => anyhow::bail!("Unknown theme '{other}' (expected light or dark)"),
        }
    }
}

/// Something that shows the active theme (screen palette, icon).
pub trait ThemeTarget {
    fn reflect(&mut self, theme: ThemePreference);
}

/// Owns the persisted theme flag.
pub struct ThemeStore {
    store: Box<dyn KeyValueStore>,
    current: ThemePreference,
}

impl ThemeStore {
    /// Read the stored preference (light when absent or unreadable) and
    /// show it on `target`.
    pub fn initialize(store: Box<dyn KeyValueStore>, target: &mut dyn ThemeTarget) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                log::warn!("{e}; using light theme");
                ThemePreference::default()
            }),
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                log::warn!("Could not read theme preference: {e:#}");
                ThemePreference::default()
            }
        };
        log::debug!("Theme: {current}");
        target.reflect(current);
        Self { store, current }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Flip the theme, persist it, and show it.
    pub fn toggle(&mut self, target: &mut dyn ThemeTarget) -> ThemePreference {
        self.set(self.current.toggled(), target)
    }

    pub fn set(&mut self, theme: ThemePreference, target: &mut dyn ThemeTarget) -> ThemePreference {
        self.current = theme;
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            log::error!("Could not save theme preference: {e:#}");
        }
        target.reflect(theme);
        theme
    }
}
