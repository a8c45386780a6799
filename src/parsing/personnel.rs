use crate::document::{line_from, ShowDocument};
use crate::text::element_text;
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

static CREDITS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#credits, .credits").expect("credits selector is valid"));
static DJS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".djs").expect("djs selector is valid"));
static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b, strong").expect("label selector is valid"));

static DJS_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*DJs\b").expect("djs label regex is valid"));
static DJS_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:DJs\s*&?\s*GUESTS|DJs)\s*:?\s*(.*?)(?:\s*[/|]|\s+RECORDED|\s*$)")
        .expect("djs line regex is valid")
});
static NAME_DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,&/]").expect("delimiter regex is valid"));

/// Hosting DJs and guests, in the order the page lists them.
pub fn extract_djs(document: &ShowDocument) -> Vec<String> {
    let from_credits = document
        .select_first(&CREDITS_SELECTOR)
        .and_then(|credits| credits.select(&DJS_SELECTOR).next())
        .map(|djs| split_names(&element_text(&djs)));

    if let Some(names) = from_credits {
        log::debug!("Found {} DJs in credits block", names.len());
        return names;
    }

    // Pages without a credits block print "DJs & GUESTS ..." as a bold label.
    let names = document
        .select_all(&LABEL_SELECTOR)
        .find(|label| DJS_LABEL_RE.is_match(&label.text().collect::<String>()))
        .and_then(|label| {
            let line = line_from(&label);
            DJS_LINE_RE
                .captures(&line)
                .map(|caps| split_names(&caps[1]))
        })
        .unwrap_or_default();
    log::debug!("Found {} DJs from labeled line", names.len());
    names
}

/// Split a delimited name list on commas, ampersands and slashes.
pub fn split_names(text: &str) -> Vec<String> {
    NAME_DELIMITER_RE
        .split(text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
