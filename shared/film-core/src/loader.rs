//! Play data discovery and loading

use crate::{FilmCoreError, PlayLibrary, PlayRecord, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// `{ "game": "Week 3 vs Eagles", "plays": [...] }`
///
/// The other accepted layout is a bare array of plays.
#[derive(Debug, Deserialize)]
struct GameFile {
    #[serde(default)]
    game: String,
    plays: Vec<PlayRecord>,
}

/// Scans a directory for play data files and loads them into a [`PlayLibrary`]
#[derive(Debug, Clone)]
pub struct PlayLoader {
    /// Accepted file extensions (lowercase, without the dot)
    extensions: Vec<String>,

    /// Descend into subdirectories
    recursive: bool,
}

impl Default for PlayLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayLoader {
    pub fn new() -> Self {
        Self {
            extensions: vec!["json".to_string()],
            recursive: true,
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Check if a file has one of the accepted extensions
    pub fn is_play_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Find play data files under `directory`, sorted by path
    pub fn scan_directory(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(FilmCoreError::Path(format!(
                "Directory does not exist: {}",
                directory.display()
            )));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(directory).min_depth(1).max_depth(max_depth) {
            let entry = entry?;
            if entry.file_type().is_file() && self.is_play_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Load the plays stored in a single file
    ///
    /// Plays with an empty `game` inherit the file-level game label.
    pub async fn load_file(&self, path: &Path) -> Result<Vec<PlayRecord>> {
        let raw = fs::read_to_string(path).await?;
        let invalid = |source: serde_json::Error| FilmCoreError::InvalidPlayData {
            path: path.to_path_buf(),
            source,
        };

        // Layout is decided by the first non-blank character
        let plays = if raw.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<PlayRecord>>(&raw).map_err(invalid)?
        } else {
            let GameFile { game, plays } = serde_json::from_str(&raw).map_err(invalid)?;
            plays
                .into_iter()
                .map(|mut play| {
                    if play.game.is_empty() {
                        play.game = game.clone();
                    }
                    play
                })
                .collect()
        };

        debug!("Loaded {} plays from {}", plays.len(), path.display());
        Ok(plays)
    }

    /// Load every play file under `directory`
    ///
    /// Files that fail to parse are skipped with a warning.
    pub async fn load_directory(&self, directory: &Path) -> Result<PlayLibrary> {
        let files = self.scan_directory(directory)?;
        let mut library = PlayLibrary::new();

        for path in &files {
            match self.load_file(path).await {
                Ok(plays) => {
                    library.extend(plays);
                    library.add_source(path);
                }
                Err(e) => {
                    warn!("Failed to load plays from {}: {}", path.display(), e);
                }
            }
        }

        info!(
            "📼 Loaded {} plays from {} files in {}",
            library.len(),
            library.sources().len(),
            directory.display()
        );
        Ok(library)
    }
}
