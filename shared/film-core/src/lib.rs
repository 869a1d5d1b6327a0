//! Film Core - Play records and play library loading shared across film study tools

pub mod play;
pub mod library;
pub mod loader;

pub use play::{HashMark, PlayKind, PlayRecord};
pub use library::PlayLibrary;
pub use loader::PlayLoader;

use std::path::PathBuf;

/// Result type for Film Core operations
pub type Result<T> = std::result::Result<T, FilmCoreError>;

/// Error types for Film Core operations
#[derive(thiserror::Error, Debug)]
pub enum FilmCoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Invalid play data in {}: {source}", path.display())]
    InvalidPlayData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
