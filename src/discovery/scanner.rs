//! Map directory scanner.
//!
//! Every map lives in its own directory under the maps root, e.g.
//! `data/maps/Route103/`, holding a `scripts.inc` (trainer battles) and, for
//! some maps, an `events.inc` (item balls and hidden items).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Script file holding trainer battle calls.
pub const SCRIPTS_FILENAME: &str = "scripts.inc";

/// Event file holding item pickups.
pub const EVENTS_FILENAME: &str = "events.inc";

/// One map directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDir {
    /// Directory name, e.g. `Route103` or `PetalburgCity_Gym`.
    pub name: String,
    pub path: PathBuf,
}

impl MapDir {
    pub fn scripts(&self) -> PathBuf {
        self.path.join(SCRIPTS_FILENAME)
    }

    pub fn events(&self) -> PathBuf {
        self.path.join(EVENTS_FILENAME)
    }
}

/// Result of scanning the maps root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Map directories sorted by name.
    pub maps: Vec<MapDir>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// List the immediate subdirectories of `root` as maps, sorted by name.
///
/// A missing root yields an empty result.
pub fn scan_maps(root: &Path) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        result.maps.push(MapDir {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
        });
    }

    result
}
