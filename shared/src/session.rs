//! Dashboard session and theme state
//!
//! Both are explicit objects over a [`PreferenceStore`]: they hydrate from
//! stored preferences on start, persist on change, and a sign-out clears the
//! stored session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const AUTH_KEY: &str = "pharma_auth";
pub const TOKEN_KEY: &str = "pharma_token";
pub const THEME_KEY: &str = "pharma_theme";

/// Key-value storage for client preferences (browser `localStorage` in the
/// dashboard, a map in tests)
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Whether the dashboard user is signed in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    signed_in: bool,
    token: Option<String>,
}

impl SessionState {
    pub fn hydrate(store: &impl PreferenceStore) -> Self {
        let signed_in = store.get(AUTH_KEY).as_deref() == Some("true");
        Self {
            signed_in,
            token: if signed_in { store.get(TOKEN_KEY) } else { None },
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// Bearer token issued at sign-in, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn sign_in(&mut self, store: &mut impl PreferenceStore, token: Option<&str>) {
        self.signed_in = true;
        store.set(AUTH_KEY, "true");
        match token {
            Some(token) => {
                store.set(TOKEN_KEY, token);
                self.token = Some(token.to_string());
            }
            None => {
                store.remove(TOKEN_KEY);
                self.token = None;
            }
        }
    }

    pub fn sign_out(&mut self, store: &mut impl PreferenceStore) {
        self.signed_in = false;
        self.token = None;
        store.remove(AUTH_KEY);
        store.remove(TOKEN_KEY);
    }
}

/// Colour scheme of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePreference {
    theme: Theme,
}

impl ThemePreference {
    pub fn hydrate(store: &impl PreferenceStore) -> Self {
        let theme = match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn set(&mut self, store: &mut impl PreferenceStore, theme: Theme) {
        self.theme = theme;
        store.set(THEME_KEY, theme.as_str());
    }

    pub fn toggle(&mut self, store: &mut impl PreferenceStore) -> Theme {
        let next = self.theme.toggled();
        self.set(store, next);
        next
    }
}
