//! JSON document writing and reading.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PokedexError, Result};

/// Write `records` as a pretty-printed JSON array, creating the parent
/// directory if needed.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PokedexError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let mut json = serde_json::to_string_pretty(records).map_err(|e| PokedexError::Build {
        message: format!("Failed to serialize {}: {}", path.display(), e),
        help: None,
    })?;
    json.push('\n');

    fs::write(path, json).map_err(|e| PokedexError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

/// Read a JSON array previously written by [`write_json`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| PokedexError::read(path, e))?;
    serde_json::from_str(&content).map_err(|e| PokedexError::Parse {
        message: format!("{}: {}", path.display(), e),
        help: Some("Re-run the stage that writes this file".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RouteItem;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data/nested/items.json");
        let items = vec![RouteItem {
            item: "Potion".into(),
            hidden: false,
        }];

        write_json(&path, &items).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {"));
        assert!(content.ends_with("]\n"));
        assert_eq!(read_json::<RouteItem>(&path).unwrap(), items);
    }

    #[test]
    fn test_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routes.json");
        write_json::<RouteItem>(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let dir = tempdir().unwrap();
        let result = read_json::<RouteItem>(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PokedexError::Io { .. })));
    }

    #[test]
    fn test_read_malformed_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(
            read_json::<RouteItem>(&path),
            Err(PokedexError::Parse { .. })
        ));
    }
}
