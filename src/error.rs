use std::path::PathBuf;
use std::{error, fmt, io};

use crate::spatial::GridPos;

/// Error type for loading, editing and saving tile maps.
#[derive(Debug)]
pub enum MapError {
    /// The map file is missing, is not valid JSON, or lacks a required field.
    Parse {
        /// Map file being read.
        path: PathBuf,
        /// Underlying decoder error (file-open failures are reported as io errors).
        source: serde_json::Error,
    },
    /// A referenced image could not be loaded.
    Image {
        /// Resolved image path.
        path: PathBuf,
        /// Loader-specific description.
        reason: String,
    },
    /// A tile number is outside the map's tile list.
    InvalidTile {
        /// Offending tile number.
        tile: u32,
        /// Number of tiles the map declares.
        tile_count: usize,
    },
    /// No tile is placed at the position.
    KeyNotFound(GridPos),
    /// Writing the map file failed.
    Io {
        /// Map file being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Parse { path, source } => {
                write!(f, "Failed to parse map file {}: {}", path.display(), source)
            }
            MapError::Image { path, reason } => {
                write!(f, "Failed to load image {}: {}", path.display(), reason)
            }
            MapError::InvalidTile { tile, tile_count } => write!(
                f,
                "Invalid tile number {} (map has {} tiles)",
                tile, tile_count
            ),
            MapError::KeyNotFound(pos) => write!(f, "No tile placed at {}", pos),
            MapError::Io { path, source } => {
                write!(f, "I/O error writing {}: {}", path.display(), source)
            }
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Parse { source, .. } => Some(source),
            MapError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
