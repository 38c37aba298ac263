use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "tracker";
const DOCUMENT_FILE: &str = "tasks.json";
const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 500;

/// How the host presents the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Every project expanded into a single indented list.
    #[default]
    Tree,
    /// Only the children of the currently selected entity.
    DrillDown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub save_debounce_ms: Option<u64>,
    #[serde(default)]
    pub default_view: Option<ViewMode>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/tracker/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("tracker/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("tracker\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms.unwrap_or(DEFAULT_SAVE_DEBOUNCE_MS))
    }

    pub fn effective_view(&self) -> ViewMode {
        self.default_view.unwrap_or_default()
    }

    /// Resolve where the persisted document lives.
    ///
    /// An explicit path wins, then the local debug path, then the configured
    /// `data_file`, then the platform data directory.
    pub fn resolve_data_file(&self, explicit: Option<&Path>, use_local_debug_path: bool) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if use_local_debug_path {
            return PathBuf::from(DOCUMENT_FILE);
        }
        if let Some(ref path) = self.data_file {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join(DOCUMENT_FILE))
            .unwrap_or_else(|| PathBuf::from(DOCUMENT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_save_debounce(), Duration::from_millis(500));
        assert_eq!(config.effective_view(), ViewMode::Tree);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_file = \"/tmp/work.json\"\nsave_debounce_ms = 250\ndefault_view = \"drill-down\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/work.json")));
        assert_eq!(config.effective_save_debounce(), Duration::from_millis(250));
        assert_eq!(config.effective_view(), ViewMode::DrillDown);
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "save_debounce_ms = \"soon\"").unwrap();

        let config = AppConfig::load_from(&path);
        assert!(config.save_debounce_ms.is_none());
    }

    #[test]
    fn test_resolve_data_file_precedence() {
        let config = AppConfig {
            data_file: Some(PathBuf::from("/configured/tasks.json")),
            ..Default::default()
        };

        let explicit = PathBuf::from("/explicit.json");
        assert_eq!(
            config.resolve_data_file(Some(&explicit), true),
            PathBuf::from("/explicit.json")
        );
        assert_eq!(
            config.resolve_data_file(None, true),
            PathBuf::from("tasks.json")
        );
        assert_eq!(
            config.resolve_data_file(None, false),
            PathBuf::from("/configured/tasks.json")
        );
    }
}
