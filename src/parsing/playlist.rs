use crate::document::ShowDocument;
use crate::text::element_text;
use crate::TrackEntry;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static FALLBACK_CONTAINER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.playlist").expect("playlist selector is valid"));
static LIST_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("li selector is valid"));
static ARTIST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".artist").expect("artist selector is valid"));
static SONG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".song").expect("song selector is valid"));
static NOTE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".note").expect("note selector is valid"));

const FREEFORM_SEPARATOR: &str = " - ";

/// Extract the playlist in page order.
///
/// Newer pages wrap each entry in a `div` with typed `.artist`/`.song`
/// children; older ones use list items holding "Artist - Track" text.
pub fn extract_playlist(document: &ShowDocument) -> Vec<TrackEntry> {
    let Some(container) = document
        .find_by_id("playlistbox")
        .or_else(|| document.select_first(&FALLBACK_CONTAINER_SELECTOR))
    else {
        log::debug!("No playlist container found");
        return Vec::new();
    };

    let mut rows: Vec<ElementRef> = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .collect();
    if rows.is_empty() {
        rows = container.select(&LIST_ITEM_SELECTOR).collect();
    }
    log::debug!("Found {} playlist rows", rows.len());

    let tracks: Vec<TrackEntry> = rows.iter().filter_map(parse_playlist_row).collect();
    log::debug!("Parsed {} playlist entries", tracks.len());
    tracks
}

/// Parse a single playlist row, `None` for blank rows and dividers.
pub fn parse_playlist_row(row: &ElementRef) -> Option<TrackEntry> {
    let artist_tag = row.select(&ARTIST_SELECTOR).next();
    let song_tag = row.select(&SONG_SELECTOR).next();

    let (artist, track) = match (artist_tag, song_tag) {
        (Some(artist), Some(song)) => (element_text(&artist), element_text(&song)),
        _ => {
            let text = element_text(row);
            if text.is_empty() {
                return None;
            }
            split_freeform(&text)
        }
    };

    if artist.is_empty() && track.is_empty() {
        return None;
    }

    let note = row
        .select(&NOTE_SELECTOR)
        .next()
        .map(|note| strip_parentheses(&element_text(&note)))
        .filter(|note| !note.is_empty());

    Some(TrackEntry {
        artist,
        track,
        note,
    })
}

/// Split "Artist - Track" on the first separator; no separator means the
/// whole text is the artist.
pub fn split_freeform(text: &str) -> (String, String) {
    match text.split_once(FREEFORM_SEPARATOR) {
        Some((artist, track)) => (artist.trim().to_string(), track.trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn strip_parentheses(note: &str) -> String {
    note.trim_matches(|c| c == '(' || c == ')').trim().to_string()
}
