//! Page renderers.
//!
//! Each page has its own renderer that selects, filters and orders the
//! repeaters, maps them through the formatters and writes the resulting markup
//! into the page's containers:
//!
//! - **Index** (`index.html`): three compact lists, one per link type.
//! - **Repeaters** (`repeaters.html`): a quick reference table of every
//!   non-SKYWARN repeater sorted by location, then three detailed lists.
//!
//! # Example
//!
//! ```
//! use repeaterview::render::{render_page, Page};
//! use repeaterview::sink::FragmentSink;
//! use repeaterview::RepeaterData;
//!
//! let data = RepeaterData::from_json(
//!     r#"{"repeaters": [{"id": "r1", "linkType": "fulltime", "location": "Rome"}]}"#,
//! ).unwrap();
//!
//! let mut sink = FragmentSink::with_containers(["fulltime-repeaters-list"]);
//! render_page(&Page::Index, Some(&data), &mut sink);
//!
//! assert!(sink.get("fulltime-repeaters-list").unwrap().contains("Rome"));
//! ```

mod detail;
mod index;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::Error;
use crate::repeater::RepeaterData;
use crate::sink::{Container, HtmlDocumentSink, ViewSink};

pub use detail::{
    quick_reference_order, render_detailed_list_item, render_repeaters_page, render_table_row,
};
pub use index::{render_index_repeaters, render_simple_list_item};

/// File name assumed when a path has none (a bare directory URL).
pub const DEFAULT_PAGE_FILE: &str = "index.html";

/// Which page is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The landing page with summary lists.
    Index,
    /// The full repeater directory.
    Repeaters,
    /// Any other page. Nothing is rendered for it.
    Other(String),
}

impl Page {
    /// Detect the page from a URL path or file path.
    ///
    /// Only the last `/`-separated segment counts, and it must be exactly
    /// `index.html` or `repeaters.html`. An empty segment means `index.html`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let name = match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_PAGE_FILE,
        };
        match name {
            "index.html" => Self::Index,
            "repeaters.html" => Self::Repeaters,
            other => Self::Other(other.to_string()),
        }
    }

    /// File name of the page.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::Index => "index.html",
            Self::Repeaters => "repeaters.html",
            Self::Other(name) => name,
        }
    }

    /// Containers this page's renderer writes to.
    #[must_use]
    pub fn containers(&self) -> &'static [Container] {
        match self {
            Self::Index => &Container::INDEX_PAGE,
            Self::Repeaters => &Container::REPEATERS_PAGE,
            Self::Other(_) => &[],
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Page {
    type Err = Error;

    /// Accepts `index` / `repeaters` with or without the `.html` extension.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "index" | "index.html" => Ok(Self::Index),
            "repeaters" | "repeaters.html" => Ok(Self::Repeaters),
            other => Err(Error::unknown_page(other)),
        }
    }
}

/// Render the given page.
///
/// Without data nothing is written: a failed load leaves the page as it was.
pub fn render_page(page: &Page, data: Option<&RepeaterData>, sink: &mut dyn ViewSink) {
    let Some(data) = data else {
        debug!(%page, "no repeater data, skipping render");
        return;
    };

    match page {
        Page::Index => {
            debug!(%page, repeaters = data.len(), "rendering index lists");
            render_index_repeaters(data, sink);
        }
        Page::Repeaters => {
            debug!(%page, repeaters = data.len(), "rendering repeater directory");
            render_repeaters_page(data, sink);
        }
        Page::Other(_) => debug!(%page, "no renderer for page"),
    }
}

/// Render a page into a full HTML document and return the updated text.
///
/// Containers missing from the document are skipped. Without data the
/// document comes back unchanged.
#[must_use]
pub fn render_html_document(page: &Page, data: Option<&RepeaterData>, html: &str) -> String {
    let mut sink = HtmlDocumentSink::new(html);
    render_page(page, data, &mut sink);
    sink.into_html()
}

/// Write one container if the sink has it. The markup is only built when
/// the container exists.
pub(crate) fn fill(sink: &mut dyn ViewSink, container: Container, render: impl FnOnce() -> String) {
    let key = container.id();
    if !sink.has_container(key) {
        trace!(container = key, "container not present, skipped");
        return;
    }
    let markup = render();
    debug!(container = key, bytes = markup.len(), "filled container");
    sink.write(key, markup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeater::Repeater;
    use crate::sink::FragmentSink;

    fn data() -> RepeaterData {
        RepeaterData::new(vec![Repeater {
            id: Some("r1".to_string()),
            link_type: Some("fulltime".to_string()),
            location: Some("Rome".to_string()),
            ..Repeater::default()
        }])
    }

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/index.html"), Page::Index);
        assert_eq!(Page::from_path("/site/repeaters.html"), Page::Repeaters);
        assert_eq!(Page::from_path("repeaters.html"), Page::Repeaters);
        assert_eq!(Page::from_path("/"), Page::Index);
        assert_eq!(Page::from_path(""), Page::Index);
        assert_eq!(
            Page::from_path("/about.html"),
            Page::Other("about.html".to_string())
        );
        assert_eq!(
            Page::from_path("/Repeaters.html"),
            Page::Other("Repeaters.html".to_string())
        );
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("index".parse::<Page>().unwrap(), Page::Index);
        assert_eq!("repeaters.html".parse::<Page>().unwrap(), Page::Repeaters);
        let err = "contact".parse::<Page>().unwrap_err();
        assert!(err.to_string().contains("contact"));
    }

    #[test]
    fn test_page_containers() {
        assert_eq!(Page::Index.containers().len(), 3);
        assert_eq!(Page::Repeaters.containers().len(), 4);
        assert_eq!(
            Page::Repeaters.containers()[0],
            Container::QuickReferenceTable
        );
        assert!(Page::Other("x".to_string()).containers().is_empty());
    }

    #[test]
    fn test_render_page_without_data_writes_nothing() {
        let mut sink = FragmentSink::accept_all();
        render_page(&Page::Index, None, &mut sink);
        render_page(&Page::Repeaters, None, &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_render_page_other_writes_nothing() {
        let mut sink = FragmentSink::accept_all();
        render_page(&Page::Other("about.html".to_string()), Some(&data()), &mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_render_page_dispatches_by_page() {
        let mut sink = FragmentSink::accept_all();
        render_page(&Page::Index, Some(&data()), &mut sink);
        let written: Vec<_> = sink.fragments().keys().cloned().collect();
        assert_eq!(
            written,
            vec![
                "fulltime-repeaters-list",
                "parttime-repeaters-list",
                "skywarn-repeaters-list"
            ]
        );

        let mut sink = FragmentSink::accept_all();
        render_page(&Page::Repeaters, Some(&data()), &mut sink);
        assert_eq!(sink.len(), 4);
        assert!(sink.get("quick-reference-table").is_some());
        assert!(sink.get("fulltime-repeaters-list").is_none());
    }

    #[test]
    fn test_render_html_document() {
        let html = "<ul id=\"fulltime-repeaters-list\">loading</ul><ul id=\"skywarn-repeaters-list\"></ul>";
        let out = render_html_document(&Page::Index, Some(&data()), html);
        assert!(out.contains("<span class=\"repeater-name\">Rome</span>"));
        assert!(!out.contains("loading"));
        assert!(out.ends_with("<ul id=\"skywarn-repeaters-list\"></ul>"));

        assert_eq!(render_html_document(&Page::Index, None, html), html);
    }

    #[test]
    fn test_fill_skips_missing_container() {
        let mut sink = FragmentSink::with_containers(["quick-reference-table"]);
        let mut called = false;
        fill(&mut sink, Container::FulltimeDetailedList, || {
            called = true;
            String::new()
        });
        assert!(!called);
        assert!(sink.is_empty());
    }
}
