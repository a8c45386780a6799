//! HTML parsing for WEFUNK show pages.
//!
//! Every extractor here is a pure function over a [`ShowDocument`]. The
//! [`ShowParser`] runs them in order and decides whether a page yields a
//! record at all.

pub mod date;
pub mod identity;
pub mod notes;
pub mod personnel;
pub mod playlist;

use crate::config::show_url;
use crate::document::ShowDocument;
use crate::{MetaInfo, Result, ScrapeError, ShowRecord};
use scraper::Selector;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

static DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p#showdescription").expect("description selector is valid")
});

/// Turns show page bodies into [`ShowRecord`]s.
///
/// Stateless apart from the base URL used to fill in [`ShowRecord::url`].
#[derive(Debug, Clone)]
pub struct ShowParser {
    base_url: String,
}

impl ShowParser {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Extract a show record from a fetched page body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::MissingIdentity`] / [`ScrapeError::IdentityMismatch`]
    ///   when the page is not the requested show
    /// - [`ScrapeError::EmptyPage`] when there is neither a playlist nor a description
    /// - [`ScrapeError::Parse`] for any unexpected failure inside the extractors
    pub fn parse_show(&self, body: &str, show_id: u32) -> Result<ShowRecord> {
        panic::catch_unwind(AssertUnwindSafe(|| self.extract(body, show_id))).unwrap_or_else(
            |payload| {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(ScrapeError::Parse(format!("show {show_id}: {reason}")))
            },
        )
    }

    fn extract(&self, body: &str, show_id: u32) -> Result<ShowRecord> {
        let document = ShowDocument::parse(body);

        identity::validate_identity(&document, show_id)?;

        let description = document.text_of(&DESCRIPTION_SELECTOR);
        let tracks = playlist::extract_playlist(&document);
        if tracks.is_empty() && description.is_empty() {
            return Err(ScrapeError::EmptyPage { show_id });
        }

        let recorded = date::resolve_recorded_date(&document);
        let djs = personnel::extract_djs(&document);
        let extra = notes::extract_extra_notes(&document);

        Ok(ShowRecord {
            show_id: show_id.to_string(),
            url: show_url(&self.base_url, show_id),
            description,
            tracks,
            meta: MetaInfo {
                recorded,
                djs,
                extra_notes: extra.text,
                extra_notes_links: (!extra.links.is_empty()).then_some(extra.links),
            },
        })
    }
}

impl Default for ShowParser {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BASE_URL)
    }
}
