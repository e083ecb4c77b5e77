//! Dark/light theme preference and its persistence.
//!
//! The stored value is a plain string: `"dark"` means dark mode, anything
//! else (including nothing at all) means light. Storage sits behind
//! [`PreferenceStore`] so the toggle logic runs without a browser; the `web`
//! module supplies the `localStorage` implementation.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Only `"dark"` selects dark mode.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Key/value string storage for a single preference.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// In-process store, used where no browser storage exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

/// Current theme plus the store it is persisted to.
pub struct ThemeToggle<S> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeToggle<S> {
    /// Restore the persisted theme from `store`.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = Theme::from_stored(store.get(&key).as_deref());
        Self { store, key, current }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled())
    }

    /// Persist an explicit theme, e.g. one read back from the page.
    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        self.store.set(&self.key, theme.as_str());
        theme
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
