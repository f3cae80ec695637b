use serde::Deserialize;
use std::path::PathBuf;

/// Launcher settings read from `settings.json`. Every field is optional in the
/// file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Base URL or directory that `/config/...` paths are resolved against.
    #[serde(default = "default_site_root")]
    pub site_root: String,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of the log output.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
}

fn default_site_root() -> String {
    ".".into()
}

fn default_window_size() -> (f32, f32) {
    (520.0, 640.0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_root: default_site_root(),
            debug_logging: false,
            log_file: None,
            window_size: default_window_size(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply a site root given on the command line.
    pub fn with_site_root(mut self, root: Option<String>) -> Self {
        if let Some(root) = root.filter(|r| !r.trim().is_empty()) {
            self.site_root = root;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let s = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"site_root": "https://me.example", "debug_logging": true}"#)
            .unwrap();
        let s = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(s.site_root, "https://me.example");
        assert!(s.debug_logging);
        assert_eq!(s.window_size, (520.0, 640.0));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Settings::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn command_line_root_overrides() {
        let s = Settings::default().with_site_root(Some("site".into()));
        assert_eq!(s.site_root, "site");
        let s = Settings::default().with_site_root(Some("  ".into()));
        assert_eq!(s.site_root, ".");
    }
}
