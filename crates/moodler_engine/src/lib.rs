//! Moodler engine: fetches course and section pages, extracts resource
//! links and persists the files they redirect to.
mod decode;
mod download;
mod fetch;
mod markup;
mod persist;
mod types;
mod walker;

pub use decode::{decode_page, DecodedPage};
pub use download::download_resource;
pub use fetch::{FetchSettings, HttpClient, HttpResponse, RedirectMode, ReqwestClient};
pub use markup::{Anchor, HtmlDocument, Markup, MarkupError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EventSink, FailureKind, FetchError, ScrapeError, ScrapeEvent};
pub use walker::{
    discover_sections, resource_links, section_link_pattern, Scraper, ENROLMENT_SENTINEL,
    RESOURCE_SELECTOR,
};
