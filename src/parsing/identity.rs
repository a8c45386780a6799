use crate::document::ShowDocument;
use crate::{Result, ScrapeError};
use regex::Regex;
use std::sync::LazyLock;

static SHOW_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Show\s+(\d+)").expect("show number regex is valid"));

/// Check that the page title names the requested show.
///
/// The archive redirects unknown ids to the homepage or to a neighbouring
/// show without an error status, so a 200 response alone proves nothing.
pub fn validate_identity(document: &ShowDocument, requested: u32) -> Result<()> {
    let title = document.title().unwrap_or_default();

    let Some(caps) = SHOW_NUMBER_RE.captures(&title) else {
        return Err(ScrapeError::MissingIdentity { requested });
    };

    // Digits too long for u32 can't be the requested id either.
    match caps[1].parse::<u32>() {
        Ok(found) if found == requested => Ok(()),
        Ok(found) => Err(ScrapeError::IdentityMismatch { requested, found }),
        Err(_) => Err(ScrapeError::MissingIdentity { requested }),
    }
}
