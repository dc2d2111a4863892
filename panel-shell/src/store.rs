//! Persisted preferences and session marker storage.

use std::collections::BTreeMap;

use secrecy::SecretString;

use crate::error::StoreError;
use crate::session::SessionMarker;

const FLAG_ON: &str = "1";
const FLAG_OFF: &str = "0";

/// Keys understood by the shell's preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Token,
    IsLoggedIn,
    Username,
    /// Older login flows wrote the display name under `user`.
    LegacyUser,
    Role,
    SidebarCollapsed,
    ThemeDark,
}

impl StoreKey {
    /// Keys removed on logout. Layout and theme preferences survive.
    pub const SESSION: [StoreKey; 5] = [
        StoreKey::IsLoggedIn,
        StoreKey::Username,
        StoreKey::LegacyUser,
        StoreKey::Role,
        StoreKey::Token,
    ];

    /// Name of the key inside the backing store.
    pub const fn as_str(self) -> &'static str {
        match self {
            StoreKey::Token => "token",
            StoreKey::IsLoggedIn => "isLoggedIn",
            StoreKey::Username => "username",
            StoreKey::LegacyUser => "user",
            StoreKey::Role => "role",
            StoreKey::SidebarCollapsed => "sidebarCollapsed",
            StoreKey::ThemeDark => "themeDark",
        }
    }
}

/// Backend for persisted shell preferences.
pub trait PreferenceStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError>;
}

/// In-memory store used by tests and as a volatile fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: StoreKey, value: &str) -> Self {
        self.entries
            .insert(key.as_str().to_string(), value.to_string());
        self
    }

    /// Raw lookup, bypassing the `Result` of the trait.
    pub fn get(&self, key: StoreKey) -> Option<&str> {
        self.entries.get(key.as_str()).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key.as_str()).cloned())
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.entries
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.entries.remove(key.as_str());
        Ok(())
    }
}

/// Typed accessors over an injected [`PreferenceStore`].
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read every session key. Any backend error aborts the whole read.
    pub fn session_marker(&self) -> Result<SessionMarker, StoreError> {
        let token = self
            .store
            .read(StoreKey::Token)?
            .filter(|value| !value.is_empty())
            .map(SecretString::from);
        let logged_in = self
            .store
            .read(StoreKey::IsLoggedIn)?
            .is_some_and(|value| value == "true");

        Ok(SessionMarker {
            token,
            logged_in,
            username: non_empty(self.store.read(StoreKey::Username)?),
            legacy_user: non_empty(self.store.read(StoreKey::LegacyUser)?),
            role: non_empty(self.store.read(StoreKey::Role)?),
        })
    }

    /// Persisted desktop collapsed flag. Unreadable values count as expanded.
    pub fn sidebar_collapsed(&self) -> bool {
        match self.store.read(StoreKey::SidebarCollapsed) {
            Ok(value) => value.as_deref() == Some(FLAG_ON),
            Err(err) => {
                log::warn!("sidebar state read failed: {err}");
                false
            },
        }
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.write_flag(StoreKey::SidebarCollapsed, collapsed);
    }

    /// Persisted theme choice, `None` when never set or unreadable.
    pub fn theme_dark(&self) -> Option<bool> {
        match self.store.read(StoreKey::ThemeDark) {
            Ok(value) => value.map(|value| value == FLAG_ON),
            Err(err) => {
                log::warn!("theme preference read failed: {err}");
                None
            },
        }
    }

    pub fn set_theme_dark(&mut self, dark: bool) {
        self.write_flag(StoreKey::ThemeDark, dark);
    }

    /// Remove every session key, keeping layout and theme preferences.
    pub fn clear_session(&mut self) {
        for key in StoreKey::SESSION {
            if let Err(err) = self.store.remove(key) {
                log::warn!("failed to clear {}: {err}", key.as_str());
            }
        }
    }

    fn write_flag(&mut self, key: StoreKey, value: bool) {
        let raw = if value { FLAG_ON } else { FLAG_OFF };
        if let Err(err) = self.store.write(key, raw) {
            log::warn!("failed to persist {}: {err}", key.as_str());
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, PreferenceStore, Preferences, StoreKey};
    use crate::error::StoreError;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn read(&self, _key: StoreKey) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable {
                reason: String::from("disabled"),
            })
        }

        fn write(
            &mut self,
            _key: StoreKey,
            _value: &str,
        ) -> Result<(), StoreError> {
            Err(StoreError::Unavailable {
                reason: String::from("disabled"),
            })
        }

        fn remove(&mut self, _key: StoreKey) -> Result<(), StoreError> {
            Err(StoreError::Unavailable {
                reason: String::from("disabled"),
            })
        }
    }

    #[test]
    fn given_flags_when_written_then_stored_as_one_and_zero() {
        let mut prefs = Preferences::new(MemoryStore::new());

        prefs.set_sidebar_collapsed(true);
        prefs.set_theme_dark(false);

        assert_eq!(prefs.store().get(StoreKey::SidebarCollapsed), Some("1"));
        assert_eq!(prefs.store().get(StoreKey::ThemeDark), Some("0"));
        assert!(prefs.sidebar_collapsed());
        assert_eq!(prefs.theme_dark(), Some(false));
    }

    #[test]
    fn given_empty_store_when_theme_read_then_returns_none() {
        let prefs = Preferences::new(MemoryStore::new());

        assert_eq!(prefs.theme_dark(), None);
        assert!(!prefs.sidebar_collapsed());
    }

    #[test]
    fn given_session_keys_when_cleared_then_preferences_survive() {
        let store = MemoryStore::new()
            .with(StoreKey::Token, "abc")
            .with(StoreKey::IsLoggedIn, "true")
            .with(StoreKey::Username, "ayse")
            .with(StoreKey::LegacyUser, "ayse")
            .with(StoreKey::Role, "admin")
            .with(StoreKey::SidebarCollapsed, "1")
            .with(StoreKey::ThemeDark, "1");
        let mut prefs = Preferences::new(store);

        prefs.clear_session();

        let store = prefs.into_inner();
        for key in StoreKey::SESSION {
            assert_eq!(store.get(key), None, "{} survived", key.as_str());
        }
        assert_eq!(store.get(StoreKey::SidebarCollapsed), Some("1"));
        assert_eq!(store.get(StoreKey::ThemeDark), Some("1"));
    }

    #[test]
    fn given_broken_store_when_session_read_then_error_is_returned() {
        let prefs = Preferences::new(BrokenStore);

        assert!(prefs.session_marker().is_err());
        assert!(!prefs.sidebar_collapsed());
        assert_eq!(prefs.theme_dark(), None);
    }

    #[test]
    fn given_broken_store_when_flags_written_then_no_panic() {
        let mut prefs = Preferences::new(BrokenStore);

        prefs.set_theme_dark(true);
        prefs.set_sidebar_collapsed(true);
        prefs.clear_session();
    }

    #[test]
    fn given_empty_username_when_marker_read_then_username_is_absent() {
        let prefs = Preferences::new(
            MemoryStore::new()
                .with(StoreKey::Username, "")
                .with(StoreKey::IsLoggedIn, "yes"),
        );

        let marker = prefs.session_marker().expect("memory store reads");

        assert_eq!(marker.username, None);
        assert!(!marker.logged_in);
        assert!(!marker.is_present());
    }

    #[test]
    fn given_whitespace_username_when_marker_read_then_session_is_present() {
        let prefs = Preferences::new(
            MemoryStore::new().with(StoreKey::Username, "   "),
        );

        let marker = prefs.session_marker().expect("memory store reads");

        assert_eq!(marker.username.as_deref(), Some("   "));
        assert!(marker.is_present());
    }
}
