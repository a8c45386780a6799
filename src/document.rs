//! Cleaned, queryable view of a fetched show page.
//!
//! Extractors never touch `scraper::Html` directly. They go through
//! [`ShowDocument`], which has already dropped the page regions that would
//! pollute text scanning (user comments, navigation, sidebars).

use crate::text::{element_text, normalize_whitespace};
use scraper::html::Select;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

/// Regions removed before any extraction runs.
static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "nav, #nav, #navigation, .navigation, #sidebar, .sidebar, aside, \
         #comments, .comments, .commentlist, #disqus_thread",
    )
    .expect("noise selector is valid")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

/// Elements that end a visual line of text.
const LINE_BREAKS: &[&str] = &[
    "br", "p", "div", "li", "ul", "ol", "table", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
    "section", "article", "hr",
];

/// Inline wrappers a label may sit inside without starting a new line.
const INLINE_WRAPPERS: &[&str] = &["span", "a", "font", "b", "strong", "em", "i", "u", "small"];

#[derive(Debug, Clone)]
pub struct ShowDocument {
    html: Html,
}

impl ShowDocument {
    /// Parse a page body and strip noise sections.
    pub fn parse(body: &str) -> Self {
        let mut html = Html::parse_document(body);
        let removed = strip_noise(&mut html);
        log::trace!("Stripped {removed} noise nodes from document");
        Self { html }
    }

    /// Normalized `<title>` text, if the page has one.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|title| element_text(&title))
    }

    /// First element with the given `id` attribute.
    pub fn find_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    pub fn select_all<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Normalized text of an element matched by `selector`, empty if absent.
    pub fn text_of(&self, selector: &Selector) -> String {
        self.select_first(selector)
            .map(|element| element_text(&element))
            .unwrap_or_default()
    }

    /// Serialized markup of the cleaned document.
    pub fn serialized(&self) -> String {
        self.html.html()
    }
}

/// Detach HTML comments and every element matching [`NOISE_SELECTOR`].
///
/// Returns the number of detached nodes.
fn strip_noise(html: &mut Html) -> usize {
    let mut doomed: Vec<_> = html.select(&NOISE_SELECTOR).map(|e| e.id()).collect();
    doomed.extend(
        html.tree
            .nodes()
            .filter(|node| node.value().is_comment())
            .map(|node| node.id()),
    );

    let mut removed = 0;
    for id in doomed {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}

/// The visual line a label element starts.
///
/// Collects the label's own text plus the content of its following siblings
/// until a line break or block element. A label wrapped alone in an inline
/// element (`<span><b>Recorded</b></span> ...`) is widened to the wrapper first.
pub fn line_from(label: &ElementRef) -> String {
    let mut anchor = *label;
    while anchor.next_sibling().is_none() {
        match anchor.parent().and_then(ElementRef::wrap) {
            Some(parent) if INLINE_WRAPPERS.contains(&parent.value().name()) => anchor = parent,
            _ => break,
        }
    }

    let mut line: String = anchor.text().collect();
    for sibling in anchor.next_siblings() {
        match sibling.value() {
            Node::Text(text) => line.push_str(text),
            Node::Element(element) => {
                if LINE_BREAKS.contains(&element.name()) {
                    break;
                }
                if let Some(element) = ElementRef::wrap(sibling) {
                    line.extend(element.text());
                }
            }
            _ => {}
        }
    }
    normalize_whitespace(&line)
}
