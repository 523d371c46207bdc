use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persisted user settings. Every field has a default so a partial config
/// file merges over the defaults instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the mindmap document lives.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Write the document back after every edit instead of on demand.
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_save_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/lifemap.md").as_ref())
}

fn default_auto_save() -> bool {
    true
}

fn default_theme() -> String {
    String::from("dark")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            auto_save: default_auto_save(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured save path
        config.save_path = Self::expand_path(&config.save_path).unwrap_or(config.save_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Load the stored settings, falling back to defaults when no config
    /// file exists yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), std::io::Error> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, content)
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/lifemap");
        PathBuf::from(config_dir.as_ref()).join("settings.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn config_path_is_under_the_lifemap_config_dir() {
        let path = Config::config_path();
        let path_str = path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/lifemap/settings.toml"));
    }

    #[test]
    fn defaults_match_the_shipped_behaviour() {
        let config = Config::default();
        assert!(config.save_path.ends_with("lifemap.md"));
        assert!(config.auto_save);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let config: Config = toml::from_str("theme = \"light\"\n").unwrap();

        assert_eq!(config.theme, "light");
        assert!(config.auto_save);
        assert!(config.save_path.ends_with("lifemap.md"));
    }

    #[test]
    fn serialization_round_trip() {
        let original = Config {
            save_path: PathBuf::from("/tmp/maps/test.md"),
            auto_save: false,
            theme: String::from("light"),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(deserialized, original);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");

        assert!(Config::load_from_path(&missing).unwrap().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("settings.toml");
        let config = Config {
            save_path: PathBuf::from("/tmp/maps/test.md"),
            auto_save: false,
            theme: String::from("dark"),
        };

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("deep").join("settings.toml");

        Config::default().save_to_path(&config_file).unwrap();
        assert!(config_file.exists());
    }

    #[test]
    fn tilde_in_save_path_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("settings.toml");
        std::fs::write(&config_file, "save_path = \"~/maps/lifemap.md\"\n").unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();
        let path_str = loaded.save_path.to_string_lossy();
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with("maps/lifemap.md"));
    }

    #[test]
    fn env_var_in_save_path_is_expanded_on_load() {
        unsafe {
            env::set_var("LIFEMAP_TEST_ROOT", "/custom/maps");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("settings.toml");
        std::fs::write(
            &config_file,
            "save_path = \"$LIFEMAP_TEST_ROOT/lifemap.md\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded.save_path, PathBuf::from("/custom/maps/lifemap.md"));

        unsafe {
            env::remove_var("LIFEMAP_TEST_ROOT");
        }
    }

    #[test]
    fn unparsable_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("settings.toml");
        std::fs::write(&config_file, "not = [valid\n").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
