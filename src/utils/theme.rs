use serde::{Deserialize, Serialize};

use crate::config;
use crate::utils::storage::{load_json, save_json, KeyValueStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored preference, if a usable one exists.
    pub fn stored<S: KeyValueStore + ?Sized>(store: &S) -> Option<Self> {
        load_json(store, config::THEME_KEY)
    }

    /// Stored preference, falling back to the OS colour scheme.
    pub fn initial<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self::stored(store).unwrap_or_else(Self::system)
    }

    fn system() -> Self {
        let prefers_dark = web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map(|query| query.matches())
            .unwrap_or(false);
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, store: &S) {
        save_json(store, config::THEME_KEY, &self);
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Mirrors the theme as the `dark` class on `<html>`.
    pub fn apply(self) {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            if let Err(e) = root.class_list().toggle_with_force("dark", self.is_dark()) {
                log::warn!("Failed to apply theme: {:?}", e);
            }
        }
    }
}
