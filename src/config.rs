use crate::calendar::FirstWeekday;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the directory under the user's home in which settings are kept
pub(crate) const APP_DIR: &str = ".ccal";

const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) first_weekday: FirstWeekday,

    // Keys we don't recognize are carried along so that saving doesn't
    // discard them
    #[serde(flatten)]
    extra: Map<String, Value>,
}

// Anything other than "mon" or "sun" (in any case) reads as the default
impl<'de> Deserialize<'de> for FirstWeekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<FirstWeekday, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = match &value {
            Value::String(s) if s.eq_ignore_ascii_case("mon") => Some(FirstWeekday::Monday),
            Value::String(s) if s.eq_ignore_ascii_case("sun") => Some(FirstWeekday::Sunday),
            _ => None,
        };
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!(%value, "Unrecognized first_weekday in config; using default");
            FirstWeekday::default()
        }))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to create directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Location of the settings file along with the operations for reading and
/// writing it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub(crate) fn new<P: Into<PathBuf>>(path: P) -> ConfigStore {
        ConfigStore { path: path.into() }
    }

    /// The standard store at `~/.ccal/config.json`, or `None` if the home
    /// directory cannot be determined
    pub(crate) fn locate() -> Option<ConfigStore> {
        dirs::home_dir().map(|home| ConfigStore::new(home.join(APP_DIR).join(CONFIG_FILE)))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, falling back to the defaults if the file is missing
    /// or cannot be read or parsed
    pub(crate) fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(config)) => {
                tracing::debug!(path = %self.path.display(), ?config, "Loaded config");
                config
            }
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "No config file; using defaults");
                Config::default()
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to load config; using defaults");
                Config::default()
            }
        }
    }

    pub(crate) fn try_load(&self) -> Result<Option<Config>, ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub(crate) fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let write_err = |source: io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        let mut fp = BufWriter::new(File::create(&self.path).map_err(write_err)?);
        serde_json::to_writer_pretty(&mut fp, config).map_err(|e| write_err(e.into()))?;
        fp.write_all(b"\n").map_err(write_err)?;
        fp.flush().map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), ?config, "Saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> ConfigStore {
        ConfigStore::new(tmp.path().join(APP_DIR).join(CONFIG_FILE))
    }

    fn write_config(store: &ConfigStore, contents: &str) {
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), contents).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert!(matches!(store.try_load(), Ok(None)));
        assert_eq!(store.load(), Config::default());
        assert_eq!(store.load().first_weekday, FirstWeekday::Monday);
    }

    #[test]
    fn test_load_sunday() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"{"first_weekday": "sun"}"#);
        assert_eq!(store.load().first_weekday, FirstWeekday::Sunday);
    }

    #[test]
    fn test_load_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"{"first_weekday": "SUN"}"#);
        assert_eq!(store.load().first_weekday, FirstWeekday::Sunday);
    }

    #[test]
    fn test_load_unknown_value() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"{"first_weekday": "thursday"}"#);
        assert_eq!(store.load().first_weekday, FirstWeekday::Monday);
        write_config(&store, r#"{"first_weekday": 6}"#);
        assert_eq!(store.load().first_weekday, FirstWeekday::Monday);
    }

    #[test]
    fn test_load_malformed() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, "{\"first_weekday\": \"sun\"");
        assert!(matches!(store.try_load(), Err(ConfigError::Parse { .. })));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_load_not_an_object() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"["sun"]"#);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn test_save_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        let config = Config {
            first_weekday: FirstWeekday::Sunday,
            ..Config::default()
        };
        store.save(&config).unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "{\n  \"first_weekday\": \"sun\"\n}\n");
    }

    #[test]
    fn test_save_load_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"{"theme": "dark", "first_weekday": "sun"}"#);
        let loaded = store.load();
        store.save(&loaded).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        let reloaded = store.load();
        assert_eq!(reloaded, loaded);
        store.save(&reloaded).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), first);
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        write_config(&store, r#"{"first_weekday": "mon", "theme": "dark"}"#);
        let mut config = store.load();
        config.first_weekday = FirstWeekday::Sunday;
        store.save(&config).unwrap();
        let value: Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["first_weekday"], "sun");
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn test_save_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the parent directory should go
        fs::write(tmp.path().join(APP_DIR), "").unwrap();
        let store = store_in(&tmp);
        let r = store.save(&Config::default());
        assert!(matches!(r, Err(ConfigError::CreateDir { .. })));
    }
}
