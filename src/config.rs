//! Board configuration
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [drag]
//! activation_distance_px = 10.0
//!
//! [sync]
//! debounce_ms = 250
//!
//! [storage]
//! database_path = "boards.db"
//!
//! [logging]
//! log_dir = "logs"
//! app_name = "CareBoard"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use board_dragdrop::DEFAULT_ACTIVATION_DISTANCE_PX;
use board_store::{init_db, BoardStore, DomainResult, InMemoryBoardStore, SqliteBoardStore};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub drag: DragConfig,
    pub sync: SyncConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel before a press turns into a drag
    pub activation_distance_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance_px: DEFAULT_ACTIVATION_DISTANCE_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Quiet period before a save is written; changes within it are merged
    pub debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl SyncConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file; boards are kept in memory only when unset
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            app_name: "CareBoard".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Build the store selected by `config`
pub async fn open_store(config: &StorageConfig) -> DomainResult<Arc<dyn BoardStore>> {
    match &config.database_path {
        Some(path) => {
            let db_state = init_db(path).await?;
            Ok(Arc::new(SqliteBoardStore::from_state(&db_state)))
        }
        None => Ok(Arc::new(InMemoryBoardStore::new())),
    }
}

/// Initialize rolling file logging as configured
pub fn init_logging(config: &LoggingConfig) -> Result<(), rolling_logger::LoggerError> {
    rolling_logger::init_logger(&config.log_dir, &config.app_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::Board;

    #[test]
    fn test_empty_config_is_default() {
        let config = BoardConfig::from_toml_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.drag.activation_distance_px, 10.0);
        assert_eq!(config.sync.debounce(), Duration::from_millis(250));
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config = BoardConfig::from_toml_str(
            r#"
            [drag]
            activation_distance_px = 4.5

            [storage]
            database_path = "/var/lib/care/boards.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.drag.activation_distance_px, 4.5);
        assert_eq!(config.sync.debounce_ms, 250);
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/var/lib/care/boards.db"))
        );
        assert_eq!(config.logging.app_name, "CareBoard");
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(matches!(
            BoardConfig::from_toml_str("[sync]\ndebounce_ms = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig::load(&dir.path().join("care-board.toml")).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("care-board.toml");
        std::fs::write(&path, "[sync]\ndebounce_ms = 0\n").unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.sync.debounce(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_open_store_variants() {
        let memory = open_store(&StorageConfig::default()).await.unwrap();
        memory.save(1, &Board::default()).await.unwrap();
        assert_eq!(memory.load(1).await.unwrap(), Some(Board::default()));

        let dir = tempfile::tempdir().unwrap();
        let sqlite = open_store(&StorageConfig {
            database_path: Some(dir.path().join("boards.db")),
        })
        .await
        .unwrap();
        assert!(sqlite.load(1).await.unwrap().is_none());
        assert!(dir.path().join("boards.db").exists());
    }
}
