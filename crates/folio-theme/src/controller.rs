//! Dark-mode controller
//!
//! Reads the persisted flag once at startup, flips it on toggle and keeps the
//! storage entry and the root marker class in step with the in-memory theme.
//! Storage problems never reach the caller: reads fall back to a default and
//! failed writes are logged while the in-memory theme still changes.

use crate::store::PreferenceStore;
use crate::theme::Theme;
use std::collections::BTreeSet;

/// Storage key for the persisted flag
pub const STORAGE_KEY: &str = "darkMode";

/// Root class applied while the dark theme is active
pub const DARK_CLASS: &str = "dark";

/// Marker classes on the document root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClassList {
    classes: BTreeSet<String>,
}

impl RootClassList {
    /// Create empty class list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; returns `false` if it was already present
    pub fn add(&mut self, class: &str) -> bool {
        self.classes.insert(class.to_string())
    }

    /// Remove a class; returns `false` if it was absent
    pub fn remove(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }

    /// Force a class on or off
    pub fn set(&mut self, class: &str, present: bool) {
        if present {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    /// Check if a class is present
    #[inline]
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Space-separated class attribute value
    #[must_use]
    pub fn to_attribute(&self) -> String {
        self.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

/// Owner of the dark-mode flag
#[derive(Debug)]
pub struct DarkModeController<S> {
    store: S,
    theme: Theme,
    root: RootClassList,
}

impl<S: PreferenceStore> DarkModeController<S> {
    /// Load the persisted flag, defaulting to [`Theme::Dark`]
    #[must_use]
    pub fn load(store: S) -> Self {
        Self::load_with_default(store, Theme::default())
    }

    /// Load the persisted flag with an explicit fallback theme
    #[must_use]
    pub fn load_with_default(store: S, fallback: Theme) -> Self {
        let theme = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => decode_flag(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring malformed {} value {:?}", STORAGE_KEY, raw);
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!("Preference read failed, using {} theme: {}", fallback, e);
                fallback
            }
        };

        tracing::debug!("Loaded theme: {}", theme);

        let mut controller = Self {
            store,
            theme,
            root: RootClassList::new(),
        };
        controller.apply_root_class();
        controller
    }

    /// Current theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Check if the dark theme is active
    #[inline]
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Flip the theme, persist it and return the new value
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    /// Switch to a specific theme and persist it
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.apply_root_class();
        self.persist();
        tracing::info!("Theme set to {}", theme);
    }

    /// Document root classes
    #[inline]
    #[must_use]
    pub fn root_classes(&self) -> &RootClassList {
        &self.root
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the store
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        let raw = encode_flag(self.theme.is_dark());
        if let Err(e) = self.store.set(STORAGE_KEY, &raw) {
            tracing::warn!("Failed to persist {}: {}", STORAGE_KEY, e);
        }
    }

    fn apply_root_class(&mut self) {
        self.root.set(DARK_CLASS, self.theme.is_dark());
    }
}

/// JSON-encode the dark flag
fn encode_flag(is_dark: bool) -> String {
    serde_json::Value::Bool(is_dark).to_string()
}

/// Decode a stored JSON boolean into a theme
fn decode_flag(raw: &str) -> Option<Theme> {
    serde_json::from_str::<bool>(raw).ok().map(Theme::from_dark_flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MockPreferenceStore, StoreError};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_value_defaults_to_dark() {
        let controller = DarkModeController::load(MemoryStore::new());
        assert_eq!(controller.theme(), Theme::Dark);
        assert!(controller.root_classes().contains(DARK_CLASS));
    }

    #[test]
    fn load_does_not_write() {
        let controller = DarkModeController::load(MemoryStore::new());
        assert!(controller.store().is_empty());
    }

    #[test]
    fn stored_false_loads_light() {
        let store = MemoryStore::new().with_value(STORAGE_KEY, "false");
        let controller = DarkModeController::load(store);
        assert_eq!(controller.theme(), Theme::Light);
        assert!(!controller.root_classes().contains(DARK_CLASS));
    }

    #[test]
    fn malformed_value_falls_back() {
        let store = MemoryStore::new().with_value(STORAGE_KEY, "yes please");
        let controller = DarkModeController::load_with_default(store, Theme::Light);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn toggle_persists_json_boolean() {
        let mut controller = DarkModeController::load(MemoryStore::new());

        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(
            controller.store().get(STORAGE_KEY).unwrap().as_deref(),
            Some("false")
        );
        assert!(!controller.root_classes().contains(DARK_CLASS));

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(
            controller.store().get(STORAGE_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(controller.root_classes().to_attribute(), "dark");
    }

    #[test]
    fn read_failure_recovers() {
        let mut store = MockPreferenceStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("private mode".into())));

        let controller = DarkModeController::load(store);
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn write_failure_still_switches_theme() {
        let mut store = MockPreferenceStore::new();
        store.expect_get().returning(|_| Ok(Some("true".into())));
        store
            .expect_set()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("quota exceeded".into())));

        let mut controller = DarkModeController::load(store);
        assert_eq!(controller.toggle(), Theme::Light);
        assert!(!controller.is_dark());
    }

    #[test]
    fn root_class_list_set_is_idempotent() {
        let mut root = RootClassList::new();
        root.set("dark", true);
        root.set("dark", true);
        assert_eq!(root.to_attribute(), "dark");
        root.set("dark", false);
        assert!(!root.contains("dark"));
    }
}
