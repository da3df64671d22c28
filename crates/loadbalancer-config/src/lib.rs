pub mod error;

pub use error::*;

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable pointing directly at a settings file
pub const CONFIG_PATH_ENV: &str = "LB_PROVIDER_CONFIG";

const APP_DIR: &str = "terraform-provider-loadbalancer";
const GLOBAL_FILE: &str = "config.yml";
const CANDIDATES: [&str; 2] = ["loadbalancer.local.yml", "loadbalancer.yml"];

/// Settings read from a YAML file
///
/// Every field is optional; values from the provider configuration block and
/// the environment take precedence over anything set here.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_uri: Option<String>,
    pub api_timeout_seconds: Option<u64>,
    pub api_pagination_per_page: Option<u32>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_uri", &self.api_uri)
            .field("api_timeout_seconds", &self.api_timeout_seconds)
            .field("api_pagination_per_page", &self.api_pagination_per_page)
            .finish()
    }
}

impl Settings {
    /// Parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the discovered settings file, or defaults when there is none
    pub fn discover() -> Result<Self> {
        match find_settings_file()? {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Directory holding the global settings file
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(APP_DIR);

    Ok(config_dir)
}

/// Locate the provider settings file
///
/// Search order:
/// 1. `LB_PROVIDER_CONFIG` environment variable (direct path, must exist)
/// 2. current directory: loadbalancer.local.yml, loadbalancer.yml
/// 3. ~/.config/terraform-provider-loadbalancer/config.yml
///
/// Returns `Ok(None)` when no settings file is present.
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(ConfigError::SettingsFileNotFound(path));
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.is_file() {
            return Ok(Some(path));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join(APP_DIR).join(GLOBAL_FILE);
        if global.is_file() {
            return Ok(Some(global));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_get_config_dir() {
        let config_dir = get_config_dir().unwrap();
        assert!(config_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_load_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("loadbalancer.yml");
        fs::write(
            &path,
            "api_key: file-key\napi_uri: http://localhost:8080\napi_timeout_seconds: 30\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("file-key"));
        assert_eq!(settings.api_uri.as_deref(), Some("http://localhost:8080"));
        assert_eq!(settings.api_timeout_seconds, Some(30));
        assert_eq!(settings.api_pagination_per_page, None);
    }

    #[test]
    fn test_load_empty_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("loadbalancer.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_invalid_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("loadbalancer.yml");
        fs::write(&path, "api_timeout_seconds: soon\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let settings = Settings {
            api_key: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }

    #[test]
    #[serial]
    fn test_find_settings_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("loadbalancer.yml"), "api_key: a").unwrap();
        fs::write(temp_dir.path().join("loadbalancer.local.yml"), "api_key: b").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_var_unset(CONFIG_PATH_ENV, find_settings_file);

        std::env::set_current_dir(original_dir).unwrap();

        let path = result.unwrap().unwrap();
        assert!(path.ends_with("loadbalancer.local.yml"));
    }

    #[test]
    #[serial]
    fn test_find_settings_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yml");
        fs::write(&config_path, "api_key: custom").unwrap();

        let result = temp_env::with_var(CONFIG_PATH_ENV, Some(&config_path), find_settings_file);

        assert_eq!(result.unwrap(), Some(config_path));
    }

    #[test]
    #[serial]
    fn test_find_settings_file_env_var_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.yml");

        let result = temp_env::with_var(CONFIG_PATH_ENV, Some(&missing), find_settings_file);

        assert!(matches!(result, Err(ConfigError::SettingsFileNotFound(_))));
    }

    #[test]
    #[serial]
    fn test_discover_without_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_vars(
            [
                (CONFIG_PATH_ENV, None::<&str>),
                ("XDG_CONFIG_HOME", temp_dir.path().to_str()),
            ],
            Settings::discover,
        );

        std::env::set_current_dir(original_dir).unwrap();

        assert_eq!(result.unwrap(), Settings::default());
    }
}
