//! Catalog configuration, persisted as TOML.
//!
//! The config lists which record files to load and where their books are
//! shelved. Its default location follows the XDG Base Directory
//! Specification: `$XDG_CONFIG_HOME/shelfmark/config.toml`.
//!
//! ```toml
//! log_filter = "debug"
//!
//! [[shelves]]
//! location = "1/2/1"
//! file = "books/denmark.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ShelfmarkError, ShelfmarkResult};
use crate::inventory::Library;
use crate::model::Location;

/// One record file and the shelf its books go on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfSource {
    pub location: Location,
    /// Relative paths are resolved against the config file's directory.
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub shelves: Vec<ShelfSource>,
}

impl CatalogConfig {
    /// Default config file path from the environment.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_home = match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| ConfigError::NoHome)?,
        };
        Ok(config_home.join("shelfmark").join("config.toml"))
    }

    /// Load from a TOML file. Relative shelf file paths are made relative to
    /// the directory holding `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(base) = path.parent() {
            for source in &mut config.shelves {
                if source.file.is_relative() {
                    source.file = base.join(&source.file);
                }
            }
        }

        tracing::debug!(path = %path.display(), shelves = config.shelves.len(), "loaded config");
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "(in memory)".into(),
            message: e.to_string(),
        })
    }

    /// Read every configured record file into `library`.
    ///
    /// Stops at the first unreadable or malformed file; books from files
    /// loaded before it stay in the library.
    pub fn populate(&self, library: &mut Library) -> ShelfmarkResult<()> {
        for source in &self.shelves {
            load_file(library, &source.file, source.location)?;
        }
        Ok(())
    }
}

/// Read one record file and shelve its books at `location`.
pub fn load_file(library: &mut Library, path: &Path, location: Location) -> ShelfmarkResult<usize> {
    let content = std::fs::read_to_string(path).map_err(|e| ShelfmarkError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let ids = library.ingest(&content, location)?;
    tracing::info!(path = %path.display(), %location, count = ids.len(), "loaded record file");
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip_toml() {
        let cfg = CatalogConfig {
            log_filter: Some("debug".into()),
            shelves: vec![ShelfSource {
                location: Location::new(1, 2, 1),
                file: PathBuf::from("/data/a.txt"),
            }],
        };
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("location = \"1/2/1\""));
        let back: CatalogConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn load_resolves_relative_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[[shelves]]\nlocation = \"2/1/3\"\nfile = \"books.txt\"\n\n\
             [[shelves]]\nlocation = \"1/1/1\"\nfile = \"/abs/other.txt\"\n",
        )
        .unwrap();

        let cfg = CatalogConfig::load(&path).unwrap();
        assert_eq!(cfg.log_filter, None);
        assert_eq!(cfg.shelves[0].file, tmp.path().join("books.txt"));
        assert_eq!(cfg.shelves[0].location, Location::new(2, 1, 3));
        assert_eq!(cfg.shelves[1].file, PathBuf::from("/abs/other.txt"));
    }

    #[test]
    fn invalid_location_is_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[[shelves]]\nlocation = \"1/2\"\nfile = \"x.txt\"\n").unwrap();
        let err = CatalogConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = CatalogConfig::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn populate_loads_every_shelf() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "Book:\nTitle: A\nBook:\nTitle: B").unwrap();
        std::fs::write(tmp.path().join("b.txt"), "Book:\nTitle: C").unwrap();
        let cfg = CatalogConfig {
            log_filter: None,
            shelves: vec![
                ShelfSource {
                    location: Location::new(1, 1, 1),
                    file: tmp.path().join("a.txt"),
                },
                ShelfSource {
                    location: Location::new(2, 1, 1),
                    file: tmp.path().join("b.txt"),
                },
            ],
        };

        let mut lib = Library::new();
        cfg.populate(&mut lib).unwrap();
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.info().rooms, 2);
    }

    #[test]
    fn populate_reports_malformed_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.txt"), "Title: no marker").unwrap();
        let cfg = CatalogConfig {
            log_filter: None,
            shelves: vec![ShelfSource {
                location: Location::new(1, 1, 1),
                file: tmp.path().join("bad.txt"),
            }],
        };
        let err = cfg.populate(&mut Library::new()).unwrap_err();
        assert!(matches!(err, ShelfmarkError::Format(_)));
    }
}
