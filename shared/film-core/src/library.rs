//! In-memory play library

use crate::PlayRecord;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Ordered, de-duplicated collection of plays plus the files they came from
#[derive(Debug, Clone, Default)]
pub struct PlayLibrary {
    plays: Vec<PlayRecord>,

    /// Ids already present, used to drop duplicates
    seen_ids: HashSet<String>,

    /// Files the plays were loaded from, in load order
    sources: Vec<PathBuf>,
}

impl PlayLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from plays already in memory
    pub fn from_plays(plays: impl IntoIterator<Item = PlayRecord>) -> Self {
        let mut library = Self::new();
        library.extend(plays);
        library
    }

    /// Append plays, keeping the first play seen for each id
    ///
    /// Returns the number of plays actually added.
    pub fn extend(&mut self, plays: impl IntoIterator<Item = PlayRecord>) -> usize {
        let mut added = 0;
        for play in plays {
            if self.seen_ids.contains(&play.id) {
                warn!("Skipping duplicate play id: {}", play.id);
                continue;
            }
            self.seen_ids.insert(play.id.clone());
            self.plays.push(play);
            added += 1;
        }
        added
    }

    pub(crate) fn add_source(&mut self, path: &Path) {
        self.sources.push(path.to_path_buf());
    }

    pub fn plays(&self) -> &[PlayRecord] {
        &self.plays
    }

    pub fn into_plays(self) -> Vec<PlayRecord> {
        self.plays
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Look up a play by id
    pub fn get(&self, id: &str) -> Option<&PlayRecord> {
        if !self.seen_ids.contains(id) {
            return None;
        }
        self.plays.iter().find(|play| play.id == id)
    }

    /// Number of plays per play type
    pub fn count_by_play_type(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for play in &self.plays {
            *counts.entry(play.play_type()).or_insert(0) += 1;
        }
        counts
    }
}
