//! Custom overlay merging.
//!
//! An overlay is a hand-written `<stem>.json` file in the custom data
//! directory, where `<stem>` is the species name lower-cased with every
//! non-letter removed (`Mr. Mime` → `mrmime.json`). Its `modifications`
//! object is attached to the species unchanged: unknown keys, key order
//! and number formatting all survive into `pokemon.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::output::{display_path, Printer};
use crate::parser::text::overlay_stem;
use crate::types::Species;

#[derive(Debug, Deserialize)]
struct OverlayDocument {
    #[serde(default)]
    modifications: Option<Value>,
}

/// Overlay path for a species name.
pub fn overlay_path(dir: &Path, species_name: &str) -> PathBuf {
    dir.join(format!("{}.json", overlay_stem(species_name)))
}

/// Parse an overlay document, returning its `modifications` if present.
pub fn parse_overlay(content: &str) -> Result<Option<Value>, serde_json::Error> {
    let document: OverlayDocument = serde_json::from_str(content)?;
    Ok(document.modifications)
}

/// Attach overlays from `dir` onto `species`; returns how many were merged.
///
/// A missing file is not reported. A malformed one is skipped with a
/// warning.
pub fn merge_overlays(species: &mut [Species], dir: &Path, printer: &Printer) -> usize {
    if !dir.is_dir() {
        return 0;
    }

    let mut merged = 0;
    for mon in species.iter_mut() {
        let path = overlay_path(dir, &mon.name);
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        match parse_overlay(&content) {
            Ok(Some(modifications)) => {
                mon.modifications = Some(modifications);
                merged += 1;
            }
            Ok(None) => {}
            Err(e) => printer.warning("Skipping", &format!("{} ({})", display_path(&path), e)),
        }
    }
    merged
}
