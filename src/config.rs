use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_COLS, DEFAULT_ROWS};

/// Board geometry and win condition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub winning_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLS,
            winning_count: 4,
        }
    }
}

/// Where the file-backed store keeps its blobs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: PathBuf::from("connect_four_data"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        if game.rows == 0 {
            return Err(ConfigError::Validation("game.rows must be >= 1".into()));
        }
        if game.columns == 0 {
            return Err(ConfigError::Validation("game.columns must be >= 1".into()));
        }
        if game.winning_count < 2 {
            return Err(ConfigError::Validation(
                "game.winning_count must be >= 2".into(),
            ));
        }
        if game.winning_count > game.rows.max(game.columns) {
            return Err(ConfigError::Validation(
                "game.winning_count must fit on the board".into(),
            ));
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.game.rows, 6);
        assert_eq!(config.game.columns, 7);
        assert_eq!(config.game.winning_count, 4);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
winning_count = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.winning_count, 5);
        assert_eq!(config.game.rows, 6);
        assert_eq!(config.storage.data_dir, PathBuf::from("connect_four_data"));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_rows() {
        let mut config = AppConfig::default();
        config.game.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_columns() {
        let mut config = AppConfig::default();
        config.game.columns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_trivial_winning_count() {
        let mut config = AppConfig::default();
        config.game.winning_count = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unreachable_winning_count() {
        let mut config = AppConfig::default();
        config.game.winning_count = 8;
        assert!(config.validate().is_err());

        config.game.winning_count = 7;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
rows = 8
columns = 9

[storage]
data_dir = "saves"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.rows, 8);
        assert_eq!(config.game.columns, 9);
        assert_eq!(config.game.winning_count, 4);
        assert_eq!(config.storage.data_dir, PathBuf::from("saves"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nrows = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
