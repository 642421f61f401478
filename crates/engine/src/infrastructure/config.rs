//! Engine configuration from the environment.
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `SCENE_CATALOG` | `content/scenes.json` | catalog file |
//! | `SAVE_DB` | `save.db` | SQLite save file, or `memory` for a throwaway session |
//! | `INITIAL_SCENE` | catalog's `initialRoute` | route to start in |
//! | `SCENE_LOCALE` | `en` | language for dialog text |

use std::path::PathBuf;

use sceneforge_domain::{Route, FALLBACK_LOCALE};

/// Where save-game state lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    Sqlite(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub catalog_path: PathBuf,
    pub save: SaveTarget,
    pub initial_scene: Option<Route>,
    pub locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("content/scenes.json"),
            save: SaveTarget::Sqlite(PathBuf::from("save.db")),
            initial_scene: None,
            locale: FALLBACK_LOCALE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            catalog_path: var("SCENE_CATALOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            save: match var("SAVE_DB") {
                Some(v) if v.eq_ignore_ascii_case("memory") => SaveTarget::Memory,
                Some(v) => SaveTarget::Sqlite(PathBuf::from(v)),
                None => defaults.save,
            },
            initial_scene: var("INITIAL_SCENE").map(Route::from),
            locale: var("SCENE_LOCALE").unwrap_or(defaults.locale),
        }
    }
}
