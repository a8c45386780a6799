use crate::document::ShowDocument;
use crate::text::{element_text, normalize_whitespace};
use scraper::Selector;
use std::sync::LazyLock;

static NOTES_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".extranotes.smalltext").expect("notes selector is valid")
});
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector is valid"));

/// Donation appeal appended to the notes of many shows.
pub const DONATION_BOILERPLATE: &str =
    "Support WEFUNK! Please donate to help keep the show on the air.";

/// Domain fragment identifying donation links.
pub const DONATION_LINK_FRAGMENT: &str = "paypal.com";

/// Tracking endpoint the archive routes outbound links through.
const CLICKOUT_MARKER: &str = "/clickout?";

/// Free-text notes and outbound links from the notes block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraNotes {
    pub text: Option<String>,
    pub links: Vec<String>,
}

pub fn extract_extra_notes(document: &ShowDocument) -> ExtraNotes {
    let Some(block) = document.select_first(&NOTES_SELECTOR) else {
        return ExtraNotes::default();
    };

    let text = normalize_whitespace(&element_text(&block).replace(DONATION_BOILERPLATE, ""));
    let text = (!text.is_empty()).then_some(text);

    let links: Vec<String> = block
        .select(&LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(clean_link)
        .collect();

    log::debug!(
        "Extra notes: {} chars, {} links",
        text.as_ref().map_or(0, String::len),
        links.len()
    );
    ExtraNotes { text, links }
}

/// Unwrap a tracking redirect and keep only absolute, non-donation links.
pub fn clean_link(href: &str) -> Option<String> {
    let url = unwrap_clickout(href.trim());

    if url.to_ascii_lowercase().contains(DONATION_LINK_FRAGMENT) {
        log::trace!("Dropping donation link {url}");
        return None;
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url)
    } else {
        None
    }
}

/// `/clickout?https://...` or `/clickout?url=https%3A%2F%2F...` → target URL.
fn unwrap_clickout(href: &str) -> String {
    if !href.contains(CLICKOUT_MARKER) {
        return href.to_string();
    }
    let Some((_, target)) = href.split_once('?') else {
        return href.to_string();
    };
    let target = target.strip_prefix("url=").unwrap_or(target);

    let lower = target.to_ascii_lowercase();
    if lower.starts_with("http%3a") || lower.starts_with("https%3a") {
        match urlencoding::decode(target) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => target.to_string(),
        }
    } else {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_clickout() {
        assert_eq!(
            unwrap_clickout("/clickout?https://bandcamp.com/album"),
            "https://bandcamp.com/album"
        );
        assert_eq!(
            unwrap_clickout("https://www.wefunkradio.com/clickout?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"),
            "https://example.com/a?b=c"
        );
        assert_eq!(unwrap_clickout("https://direct.example"), "https://direct.example");
    }

    #[test]
    fn test_clean_link_filters() {
        assert_eq!(clean_link("/show/12"), None);
        assert_eq!(clean_link("mailto:dj@example.com"), None);
        assert_eq!(clean_link("https://www.PayPal.com/donate?id=1"), None);
        assert_eq!(clean_link("/clickout?https://paypal.com/x"), None);
        assert_eq!(
            clean_link("/clickout?http://soundcloud.com/artist"),
            Some("http://soundcloud.com/artist".to_string())
        );
    }

    #[test]
    fn test_extract_removes_boilerplate_and_donation_links() {
        let html = format!(
            r#"<div class="extranotes smalltext">
                Big thanks to our guest.  {DONATION_BOILERPLATE}
                <a href="/clickout?https://guest.example.com">guest</a>
                <a href="https://www.paypal.com/donate">donate</a>
                <a href="/clickout?https://guest.example.com">again</a>
                <a href="/local">local</a>
            </div>"#
        );
        let notes = extract_extra_notes(&ShowDocument::parse(&html));
        assert_eq!(
            notes.text.as_deref(),
            Some("Big thanks to our guest. guest donate again local")
        );
        assert_eq!(
            notes.links,
            vec!["https://guest.example.com", "https://guest.example.com"]
        );
    }

    #[test]
    fn test_boilerplate_only_block_has_no_text() {
        let html = format!(r#"<p class="extranotes smalltext">  {DONATION_BOILERPLATE} </p>"#);
        let notes = extract_extra_notes(&ShowDocument::parse(&html));
        assert_eq!(notes.text, None);
        assert!(notes.links.is_empty());
    }

    #[test]
    fn test_requires_both_classes() {
        let doc = ShowDocument::parse(r#"<div class="extranotes">Not the block</div>"#);
        assert_eq!(extract_extra_notes(&doc), ExtraNotes::default());
    }
}
