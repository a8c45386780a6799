use crate::TrackEntry;
use serde::{Deserialize, Serialize};

/// Sentinel stored in [`MetaInfo::recorded`] when no tier recovered a date.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Everything extracted from a single show page.
///
/// Field names on the wire follow the archive's own element ids
/// (`showdescription`, `playlistbox`), which keeps the JSON output
/// compatible with earlier dumps of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowRecord {
    pub show_id: String,
    pub url: String,
    #[serde(rename = "showdescription")]
    pub description: String,
    #[serde(rename = "playlistbox")]
    pub tracks: Vec<TrackEntry>,
    #[serde(rename = "meta_info")]
    pub meta: MetaInfo,
}

/// Secondary show details: recording date, hosts and free-text notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Either [`UNKNOWN_DATE`] or a resolved date, long-form when it was ISO.
    pub recorded: String,
    pub djs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_notes_links: Option<Vec<String>>,
}

impl Default for MetaInfo {
    fn default() -> Self {
        Self {
            recorded: UNKNOWN_DATE.to_string(),
            djs: Vec::new(),
            extra_notes: None,
            extra_notes_links: None,
        }
    }
}

impl ShowRecord {
    /// Whether the recording date could not be recovered.
    pub fn is_date_unknown(&self) -> bool {
        self.meta.recorded == UNKNOWN_DATE
    }

    pub fn link_count(&self) -> usize {
        self.meta.extra_notes_links.as_ref().map_or(0, Vec::len)
    }
}
