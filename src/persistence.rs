use crate::{Result, ShowRecord};
use std::fs;
use std::path::Path;

/// Reading and writing the harvested show collection as a JSON array.
///
/// The whole collection is rewritten on every save, so a snapshot on disk is
/// always a complete, valid array of everything gathered so far.
pub struct SnapshotPersistence;

impl SnapshotPersistence {
    /// Save shows as a pretty-printed JSON array.
    ///
    /// Creates missing parent directories and writes through a temporary file
    /// so an interrupted save never leaves a truncated array behind.
    pub fn save(path: &Path, shows: &[ShowRecord]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(shows)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        log::debug!("Saved {} shows to {}", shows.len(), path.display());
        Ok(())
    }

    /// Load a previously saved collection.
    pub fn load(path: &Path) -> Result<Vec<ShowRecord>> {
        let json = fs::read_to_string(path)?;
        let shows = serde_json::from_str(&json)?;
        log::debug!("Loaded snapshot from {}", path.display());
        Ok(shows)
    }
}
