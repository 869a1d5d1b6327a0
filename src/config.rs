use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filters::FilterSchema;

/// Configuration for Film Room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Play library location and discovery
    #[serde(default)]
    pub library: LibraryConfig,

    /// Output and logging settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Filter table (categories, buckets, ranges)
    #[serde(default)]
    pub filters: FilterSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding play data files
    pub plays_dir: PathBuf,

    /// Play data file extensions
    pub extensions: Vec<String>,

    /// Descend into subdirectories when scanning
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for play listings
    pub format: OutputFormat,

    /// Log level
    pub log_level: String,

    /// Maximum rows printed in table format (0 = no limit)
    pub max_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            plays_dir: PathBuf::from("./plays"),
            extensions: vec!["json".to_string()],
            recursive: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            log_level: "info".to_string(),
            max_rows: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: LibraryConfig::default(),
            output: OutputConfig::default(),
            filters: FilterSchema::default(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then environment
    pub fn load() -> Result<Self> {
        let mut config_paths = vec![
            PathBuf::from("film-room.toml"),
            PathBuf::from("config/film-room.toml"),
        ];
        if let Ok(home) = std::env::var("HOME") {
            config_paths.push(Path::new(&home).join(".config/film-room/config.toml"));
        }

        for path in &config_paths {
            if !path.exists() {
                continue;
            }
            match Self::load_from(path) {
                Ok(config) => return Ok(config.with_env_overrides()),
                Err(e) => {
                    tracing::warn!("Failed to load config file {}: {:#}", path.display(), e);
                }
            }
        }

        // Environment variables alone
        if Self::env_configured() {
            return Ok(Self::default().with_env_overrides());
        }

        Err(anyhow!("No configuration file found"))
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&config_str)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    fn env_configured() -> bool {
        ["FILM_ROOM_PLAYS_DIR", "FILM_ROOM_LOG_LEVEL", "FILM_ROOM_OUTPUT_FORMAT"]
            .iter()
            .any(|key| std::env::var(key).is_ok())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(plays_dir) = std::env::var("FILM_ROOM_PLAYS_DIR") {
            self.library.plays_dir = PathBuf::from(plays_dir);
        }

        if let Ok(log_level) = std::env::var("FILM_ROOM_LOG_LEVEL") {
            self.output.log_level = log_level;
        }

        if let Ok(format) = std::env::var("FILM_ROOM_OUTPUT_FORMAT") {
            match format.to_lowercase().as_str() {
                "json" => self.output.format = OutputFormat::Json,
                "table" => self.output.format = OutputFormat::Table,
                other => tracing::warn!("Ignoring unknown FILM_ROOM_OUTPUT_FORMAT: {}", other),
            }
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library.extensions.is_empty() {
            return Err(anyhow!("library.extensions must list at least one extension"));
        }

        if self.library.plays_dir.as_os_str().is_empty() {
            return Err(anyhow!("library.plays_dir must not be empty"));
        }

        self.filters
            .validate()
            .context("invalid filter table")?;

        Ok(())
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_plays_dir(mut self, dir: PathBuf) -> Self {
        self.config.library.plays_dir = dir;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.config.library.recursive = recursive;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.config.output.max_rows = max_rows;
        self
    }

    pub fn with_filters(mut self, filters: FilterSchema) -> Self {
        self.config.filters = filters;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.library.extensions, vec!["json".to_string()]);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.filters.bucket_category("distanceType").is_some());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_plays_dir(PathBuf::from("/film/2026"))
            .with_output_format(OutputFormat::Json)
            .with_max_rows(0)
            .build();

        assert_eq!(config.library.plays_dir, PathBuf::from("/film/2026"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.max_rows, 0);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.filters.ranges[0].min = 500.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.library.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_default_filters() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("film-room.toml");
        std::fs::write(
            &path,
            r#"
[library]
plays_dir = "/film/2026"
extensions = ["json"]
recursive = false
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.library.plays_dir, PathBuf::from("/film/2026"));
        assert!(!config.library.recursive);
        assert_eq!(config.output.max_rows, 50);
        assert_eq!(config.filters, FilterSchema::default());
    }

    #[test]
    fn test_custom_filter_table_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("film-room.toml");
        std::fs::write(
            &path,
            r#"
[[filters.discrete]]
name = "down"
label = "Down"

[[filters.bucketed]]
name = "downType"
label = "Down Type"
field = "distance"

[[filters.bucketed.buckets]]
label = "Short"
min = 0
max = 2

[[filters.bucketed.buckets]]
label = "Long"
min = 3

[[filters.ranges]]
name = "epaRange"
label = "EPA"
field = "epa"
min = -5.0
max = 5.0
step = 0.5
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.filters.discrete.len(), 1);
        assert_eq!(config.filters.bucketed[0].buckets.len(), 2);
        assert_eq!(config.filters.bucketed[0].buckets[1].max, None);
        assert_eq!(config.filters.ranges[0].step, 0.5);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved.toml");

        let config = ConfigBuilder::new().with_max_rows(10).build();
        config.save(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.output.max_rows, 10);
        assert_eq!(reloaded.filters, config.filters);
    }
}
