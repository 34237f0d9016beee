use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Client configuration, loaded from `zerovault.toml`.
///
/// Every field has a sensible default so the client works against a
/// local server without any config file at all. Protocol constants
/// (KDF iterations, salt and nonce lengths) are deliberately NOT
/// configurable; they must match every verifying party exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the storage server's API.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_server_url() -> String {
    "http://127.0.0.1:3000/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = "zerovault.toml";

    /// Load settings from `<config_dir>/zerovault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Load from `~/.config/zerovault/zerovault.toml`, or defaults if
    /// no home directory can be resolved.
    pub fn load_default() -> Result<Self> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"));
        match home {
            Ok(home) => Self::load(&Path::new(&home).join(".config").join("zerovault")),
            Err(_) => Ok(Self::default()),
        }
    }

    /// The per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.server_url, "http://127.0.0.1:3000/api/v1");
        assert_eq!(s.request_timeout_secs, 30);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.server_url, "http://127.0.0.1:3000/api/v1");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
server_url = "https://vault.example.com/api/v1"
request_timeout_secs = 10
"#;
        fs::write(tmp.path().join("zerovault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.server_url, "https://vault.example.com/api/v1");
        assert_eq!(settings.request_timeout_secs, 10);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let config = "server_url = \"http://10.0.0.5:3000/api/v1\"\n";
        fs::write(tmp.path().join("zerovault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.server_url, "http://10.0.0.5:3000/api/v1");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("zerovault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }
}
