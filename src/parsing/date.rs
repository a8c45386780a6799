//! Recording date recovery.
//!
//! The archive has placed the recording date in three different spots over
//! the years. Older pages only carry a bold "RECORDED" label in the credits
//! text; recent pages drop the label but link the show audio, whose file name
//! embeds the ISO date. Each spot gets its own strategy, tried in a fixed
//! order until one produces a value.

use crate::document::{line_from, ShowDocument};
use crate::text::normalize_whitespace;
use crate::UNKNOWN_DATE;
use chrono::NaiveDate;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b, strong, em").expect("label selector is valid"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector is valid"));

static RECORDED_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)recorded").expect("label regex is valid"));
static RECORDED_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)RECORDED\s*:?\s*(.*?)(?:\s*[/|]|\s+HOSTING|\s*$)")
        .expect("recorded line regex is valid")
});
/// 1990s through 2020s, either "1997" or "'97".
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(?:199\d|20[0-2]\d)\b|'(?:9|[0-2])\d\b)").expect("year regex is valid")
});
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("iso date regex is valid"));
static EXACT_ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date regex is valid"));
static ARCHIVE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)WEFUNK_Show_\d+_(\d{4}-\d{2}-\d{2})").expect("filename regex is valid")
});

const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".ogg", ".aac", ".flac", ".wav"];

/// A single way of finding the recording date.
pub type DateStrategy = fn(&ShowDocument) -> Option<String>;

/// Strategies in the order they must be tried.
pub const DATE_STRATEGIES: &[(&str, DateStrategy)] = &[
    ("recorded label", date_from_recorded_label),
    ("media link", date_from_media_link),
    ("document scan", date_from_document_scan),
];

/// Resolve the recording date, formatted for output.
///
/// Returns [`UNKNOWN_DATE`] when no strategy finds anything.
pub fn resolve_recorded_date(document: &ShowDocument) -> String {
    let raw = DATE_STRATEGIES.iter().find_map(|(name, strategy)| {
        let found = strategy(document);
        if let Some(date) = &found {
            log::debug!("Recording date '{date}' found via {name}");
        }
        found
    });

    format_date_string(raw.as_deref().unwrap_or(UNKNOWN_DATE))
}

/// Bold "RECORDED" label followed by free text on the same line.
///
/// The capture only counts when it contains a plausible year; some pages
/// print the label with a blank or a placeholder next to it.
pub fn date_from_recorded_label(document: &ShowDocument) -> Option<String> {
    let label = document
        .select_all(&LABEL_SELECTOR)
        .find(|element| RECORDED_LABEL_RE.is_match(&element.text().collect::<String>()))?;

    let line = line_from(&label);
    let caps = RECORDED_LINE_RE.captures(&line)?;
    let date = normalize_whitespace(&caps[1]);

    if YEAR_RE.is_match(&date) {
        Some(date)
    } else {
        log::debug!("Ignoring recorded label text without a year: '{date}'");
        None
    }
}

/// ISO date embedded in the path of the first linked audio file.
pub fn date_from_media_link(document: &ShowDocument) -> Option<String> {
    let href = document
        .select_all(&LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .find(|href| is_audio_link(href))?;

    ISO_DATE_RE.find(href).map(|m| m.as_str().to_string())
}

/// Archive audio file name anywhere in the cleaned markup, scripts included.
pub fn date_from_document_scan(document: &ShowDocument) -> Option<String> {
    let markup = document.serialized();
    ARCHIVE_FILENAME_RE
        .captures(&markup)
        .map(|caps| caps[1].to_string())
}

fn is_audio_link(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href).to_ascii_lowercase();
    AUDIO_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Reformat an ISO `YYYY-MM-DD` date as "Month DD, YYYY".
///
/// Anything else, including [`UNKNOWN_DATE`], comes back unchanged.
///
/// ```rust
/// use wefunk_playlists::parsing::date::format_date_string;
///
/// assert_eq!(format_date_string("2025-12-05"), "December 05, 2025");
/// assert_eq!(format_date_string("circa 1999"), "circa 1999");
/// ```
pub fn format_date_string(value: &str) -> String {
    if !EXACT_ISO_DATE_RE.is_match(value) {
        return value.to_string();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%B %d, %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_string() {
        assert_eq!(format_date_string("2025-12-05"), "December 05, 2025");
        assert_eq!(format_date_string("1999-01-31"), "January 31, 1999");
        assert_eq!(format_date_string("Unknown"), "Unknown");
        assert_eq!(format_date_string("circa 1999"), "circa 1999");
        assert_eq!(format_date_string("2025-13-40"), "2025-13-40");
        assert_eq!(format_date_string(" 2025-12-05"), " 2025-12-05");
    }

    #[test]
    fn test_recorded_label() {
        let doc = ShowDocument::parse(
            "<p class='credits'><b>RECORDED</b> Thursday, March 4, 1999 / <b>HOSTING</b> DJ Static</p>",
        );
        assert_eq!(
            date_from_recorded_label(&doc).as_deref(),
            Some("Thursday, March 4, 1999")
        );
    }

    #[test]
    fn test_recorded_label_stops_at_hosting_marker() {
        let doc = ShowDocument::parse("<p><strong>Recorded:</strong> Oct 12 '04 HOSTING Max</p>");
        assert_eq!(date_from_recorded_label(&doc).as_deref(), Some("Oct 12 '04"));
    }

    #[test]
    fn test_recorded_label_without_year_is_ignored() {
        let doc = ShowDocument::parse("<p><b>RECORDED</b> live at the studio</p>");
        assert_eq!(date_from_recorded_label(&doc), None);

        let doc = ShowDocument::parse("<p><b>RECORDED</b> 1875</p>");
        assert_eq!(date_from_recorded_label(&doc), None);
    }

    #[test]
    fn test_media_link() {
        let doc = ShowDocument::parse(
            r#"<a href="/about">About</a>
               <a href="https://cdn.example.com/WEFUNK_Show_1200_2021-06-10.MP3?dl=1">Download</a>"#,
        );
        assert_eq!(date_from_media_link(&doc).as_deref(), Some("2021-06-10"));
    }

    #[test]
    fn test_media_link_without_date() {
        let doc = ShowDocument::parse(r#"<a href="/audio/show.mp3">Listen</a>"#);
        assert_eq!(date_from_media_link(&doc), None);
    }

    #[test]
    fn test_document_scan_finds_script_references() {
        let doc = ShowDocument::parse(
            r#"<script>var player = {file: "WEFUNK_Show_1250_2022-02-17.mp3"};</script>"#,
        );
        assert_eq!(date_from_document_scan(&doc).as_deref(), Some("2022-02-17"));
    }

    #[test]
    fn test_cascade_prefers_recorded_label() {
        let doc = ShowDocument::parse(
            r#"<p><b>RECORDED</b> 2001-05-04</p>
               <script>"WEFUNK_Show_300_2009-09-09.mp3"</script>"#,
        );
        assert_eq!(resolve_recorded_date(&doc), "May 04, 2001");
    }

    #[test]
    fn test_cascade_falls_through_to_scan() {
        let doc = ShowDocument::parse(
            r#"<p><b>RECORDED</b></p><div data-src="WEFUNK_Show_300_2009-09-09"></div>"#,
        );
        assert_eq!(resolve_recorded_date(&doc), "September 09, 2009");
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        let doc = ShowDocument::parse("<p>no dates here</p>");
        assert_eq!(resolve_recorded_date(&doc), UNKNOWN_DATE);
    }
}
