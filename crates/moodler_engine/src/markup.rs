use regex::Regex;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("invalid selector {selector}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// An `<a>` element: its raw `href` and display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// Queries the walkers run against a fetched page.
pub trait Markup {
    /// Anchors whose `href` matches `pattern`, in document order.
    fn find_anchors_by_href(&self, pattern: &Regex) -> Result<Vec<Anchor>, MarkupError>;

    /// Anchors matched by a CSS selector, in document order.
    fn select_anchors(&self, selector: &str) -> Result<Vec<Anchor>, MarkupError>;

    /// True when some text node, trimmed, equals `literal`.
    fn contains_text(&self, literal: &str) -> bool;
}

/// `Markup` over a `scraper` document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }
}

impl Markup for HtmlDocument {
    fn find_anchors_by_href(&self, pattern: &Regex) -> Result<Vec<Anchor>, MarkupError> {
        let selector = parse_selector("a[href]")?;
        Ok(self
            .html
            .select(&selector)
            .filter_map(|element| {
                let href = element.value().attr("href")?;
                pattern.is_match(href).then(|| to_anchor(element, href))
            })
            .collect())
    }

    fn select_anchors(&self, selector: &str) -> Result<Vec<Anchor>, MarkupError> {
        let parsed = parse_selector(selector)?;
        Ok(self
            .html
            .select(&parsed)
            .filter(|element| element.value().name().eq_ignore_ascii_case("a"))
            .map(|element| to_anchor(element, element.value().attr("href").unwrap_or_default()))
            .collect())
    }

    fn contains_text(&self, literal: &str) -> bool {
        self.html
            .root_element()
            .text()
            .any(|text| text.trim() == literal)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|err| MarkupError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{err:?}"),
    })
}

fn to_anchor(element: ElementRef<'_>, href: &str) -> Anchor {
    Anchor {
        href: href.to_string(),
        text: display_text(element),
    }
}

/// Moodle wraps the activity name in `.instancename` next to screen-reader
/// suffixes nested inside it; only its own text nodes make up the name.
fn display_text(element: ElementRef<'_>) -> String {
    let instancename = Selector::parse(".instancename")
        .ok()
        .and_then(|sel| element.select(&sel).next());
    let text: String = match instancename {
        Some(name) => name
            .children()
            .filter_map(|child| child.value().as_text().map(|text| &**text))
            .collect(),
        None => element.text().collect(),
    };
    text.trim().to_string()
}
