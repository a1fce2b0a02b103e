//! Output targets for rendered markup.
//!
//! Renderers never touch a document directly. They ask a [`ViewSink`] whether
//! a named container exists and, if so, hand it the markup for that container.
//! A missing container is skipped without affecting the others.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{trace, warn};

use crate::repeater::LinkType;

/// The named containers the renderers fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    /// Index page, full-time linked list.
    FulltimeRepeatersList,
    /// Index page, part-time linked list.
    ParttimeRepeatersList,
    /// Index page, SKYWARN list.
    SkywarnRepeatersList,
    /// Repeaters page, quick reference table body.
    QuickReferenceTable,
    /// Repeaters page, full-time detailed list.
    FulltimeDetailedList,
    /// Repeaters page, part-time detailed list.
    ParttimeDetailedList,
    /// Repeaters page, SKYWARN detailed list.
    SkywarnDetailedList,
}

impl Container {
    /// Every container, index page first.
    pub const ALL: [Container; 7] = [
        Self::FulltimeRepeatersList,
        Self::ParttimeRepeatersList,
        Self::SkywarnRepeatersList,
        Self::QuickReferenceTable,
        Self::FulltimeDetailedList,
        Self::ParttimeDetailedList,
        Self::SkywarnDetailedList,
    ];

    /// Containers on the index page.
    pub const INDEX_PAGE: [Container; 3] = [
        Self::FulltimeRepeatersList,
        Self::ParttimeRepeatersList,
        Self::SkywarnRepeatersList,
    ];

    /// Containers on the repeaters page, table first.
    pub const REPEATERS_PAGE: [Container; 4] = [
        Self::QuickReferenceTable,
        Self::FulltimeDetailedList,
        Self::ParttimeDetailedList,
        Self::SkywarnDetailedList,
    ];

    /// Element id of the container in the host page.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::FulltimeRepeatersList => "fulltime-repeaters-list",
            Self::ParttimeRepeatersList => "parttime-repeaters-list",
            Self::SkywarnRepeatersList => "skywarn-repeaters-list",
            Self::QuickReferenceTable => "quick-reference-table",
            Self::FulltimeDetailedList => "fulltime-detailed-list",
            Self::ParttimeDetailedList => "parttime-detailed-list",
            Self::SkywarnDetailedList => "skywarn-detailed-list",
        }
    }

    /// The index-page summary list for a link type.
    #[must_use]
    pub fn summary_list(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Fulltime => Self::FulltimeRepeatersList,
            LinkType::Parttime => Self::ParttimeRepeatersList,
            LinkType::Skywarn => Self::SkywarnRepeatersList,
        }
    }

    /// The repeaters-page detailed list for a link type.
    #[must_use]
    pub fn detailed_list(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Fulltime => Self::FulltimeDetailedList,
            LinkType::Parttime => Self::ParttimeDetailedList,
            LinkType::Skywarn => Self::SkywarnDetailedList,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Somewhere rendered markup can be written, keyed by container id.
pub trait ViewSink {
    /// Whether the target has a container with this id.
    fn has_container(&self, key: &str) -> bool;

    /// Replace the container's inner markup. Unknown keys are ignored.
    fn write(&mut self, key: &str, markup: String);
}

/// In-memory sink collecting one fragment per container.
#[derive(Debug, Clone, Default)]
pub struct FragmentSink {
    /// `None` accepts every key.
    containers: Option<BTreeSet<String>>,
    fragments: BTreeMap<String, String>,
}

impl FragmentSink {
    /// A sink that claims to have every container.
    #[must_use]
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// A sink that only has the listed containers.
    #[must_use]
    pub fn with_containers<I, S>(containers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            containers: Some(containers.into_iter().map(Into::into).collect()),
            fragments: BTreeMap::new(),
        }
    }

    /// Markup written to a container, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fragments.get(key).map(String::as_str)
    }

    /// All written fragments, ordered by container id.
    #[must_use]
    pub fn fragments(&self) -> &BTreeMap<String, String> {
        &self.fragments
    }

    /// Number of containers written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl ViewSink for FragmentSink {
    fn has_container(&self, key: &str) -> bool {
        self.containers.as_ref().map_or(true, |set| set.contains(key))
    }

    fn write(&mut self, key: &str, markup: String) {
        if self.has_container(key) {
            self.fragments.insert(key.to_string(), markup);
        }
    }
}

/// Elements that never have inner markup.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose body is raw text, never markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// One markup token: a comment (no groups) or a tag.
///
/// Tag groups: 1 the end-tag slash, 2 the name, 3 the attribute list,
/// 4 the self-closing slash. Attribute values may be quoted and contain `>`.
const TOKEN_PATTERN: &str = r#"<!--(?s:.*?)-->|<!--(?s:.*)|<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)\s*>"#;

/// One attribute: group 1 the name, groups 2 to 4 the value by quoting style.
const ATTRIBUTE_PATTERN: &str = r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#;

/// Compile a fixed pattern once.
///
/// # Panics
///
/// Panics if the pattern is invalid, which the tests below rule out.
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid markup pattern"))
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    compiled(&TOKEN, TOKEN_PATTERN)
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    compiled(&ATTRIBUTE, ATTRIBUTE_PATTERN)
}

fn raw_text_end_regex(name: &str) -> &'static Regex {
    static SCRIPT: OnceLock<Regex> = OnceLock::new();
    static STYLE: OnceLock<Regex> = OnceLock::new();
    if name.eq_ignore_ascii_case("script") {
        compiled(&SCRIPT, r"(?i)</script\s*>")
    } else {
        compiled(&STYLE, r"(?i)</style\s*>")
    }
}

/// Whether an attribute list carries exactly `id="<key>"`.
///
/// Only the first `id` attribute counts, as in a browser.
fn has_id(attributes: &str, key: &str) -> bool {
    attribute_regex()
        .captures_iter(attributes)
        .find(|attr| attr[1].eq_ignore_ascii_case("id"))
        .and_then(|attr| attr.get(2).or(attr.get(3)).or(attr.get(4)))
        .is_some_and(|value| value.as_str() == key)
}

fn is_one_of(name: &str, names: &[&str]) -> bool {
    names.iter().any(|n| n.eq_ignore_ascii_case(name))
}

/// Sink over a full HTML document held as text.
///
/// Containers are located by their `id` attribute. Writing replaces everything
/// between the container's start tag and its matching end tag. Comments and
/// `<script>`/`<style>` bodies are never searched.
#[derive(Debug, Clone)]
pub struct HtmlDocumentSink {
    html: String,
}

impl HtmlDocumentSink {
    /// Wrap a document.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The document in its current state.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Consume the sink and return the updated document.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Byte range of the inner markup of the element with the given id.
    fn inner_range(&self, key: &str) -> Option<(usize, usize)> {
        // Open element name and where its inner markup starts
        let mut open: Option<(&str, usize)> = None;
        let mut depth = 0usize;
        let mut pos = 0;

        while let Some(token) = token_regex().captures_at(&self.html, pos) {
            let whole = token.get(0)?;
            pos = whole.end();
            let Some(name) = token.get(2).map(|m| m.as_str()) else {
                continue;
            };
            let closing = token.get(1).is_some_and(|m| !m.as_str().is_empty());
            let self_closing = token.get(4).is_some_and(|m| !m.as_str().is_empty());

            match open {
                None => {
                    let attributes = token.get(3).map_or("", |m| m.as_str());
                    if !closing && has_id(attributes, key) {
                        if self_closing || is_one_of(name, VOID_ELEMENTS) {
                            trace!("container '{key}' is a void element");
                            return None;
                        }
                        open = Some((name, pos));
                        depth = 1;
                    }
                }
                Some((open_name, inner_start)) if name.eq_ignore_ascii_case(open_name) => {
                    if closing {
                        depth -= 1;
                        if depth == 0 {
                            return Some((inner_start, whole.start()));
                        }
                    } else if !self_closing {
                        depth += 1;
                    }
                }
                Some(_) => {}
            }

            if !closing && !self_closing && is_one_of(name, RAW_TEXT_ELEMENTS) {
                pos = raw_text_end_regex(name)
                    .find_at(&self.html, pos)
                    .map_or(self.html.len(), |m| m.end());
            }
        }

        if let Some((name, _)) = open {
            warn!("container '{key}' has no closing </{name}> tag");
        }
        None
    }
}

impl ViewSink for HtmlDocumentSink {
    fn has_container(&self, key: &str) -> bool {
        self.inner_range(key).is_some()
    }

    fn write(&mut self, key: &str, markup: String) {
        if let Some((start, end)) = self.inner_range(key) {
            self.html.replace_range(start..end, &markup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_ids() {
        assert_eq!(Container::FulltimeRepeatersList.id(), "fulltime-repeaters-list");
        assert_eq!(Container::QuickReferenceTable.id(), "quick-reference-table");
        assert_eq!(Container::SkywarnDetailedList.to_string(), "skywarn-detailed-list");
        assert_eq!(Container::ALL.len(), 7);
    }

    #[test]
    fn test_container_for_link_type() {
        assert_eq!(
            Container::summary_list(LinkType::Parttime),
            Container::ParttimeRepeatersList
        );
        assert_eq!(
            Container::detailed_list(LinkType::Skywarn),
            Container::SkywarnDetailedList
        );
    }

    #[test]
    fn test_fragment_sink_accept_all() {
        let mut sink = FragmentSink::accept_all();
        assert!(sink.has_container("anything"));
        sink.write("a", "<li>1</li>".to_string());
        assert_eq!(sink.get("a"), Some("<li>1</li>"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_fragment_sink_restricted() {
        let mut sink = FragmentSink::with_containers(["a"]);
        assert!(sink.has_container("a"));
        assert!(!sink.has_container("b"));

        sink.write("b", "dropped".to_string());
        assert!(sink.is_empty());
        assert!(sink.get("b").is_none());
    }

    #[test]
    fn test_html_sink_replaces_inner_markup() {
        let mut sink = HtmlDocumentSink::new(
            r#"<body><ul id="fulltime-repeaters-list"><li>old</li></ul></body>"#,
        );
        assert!(sink.has_container("fulltime-repeaters-list"));

        sink.write("fulltime-repeaters-list", "<li>new</li>".to_string());
        assert_eq!(
            sink.html(),
            r#"<body><ul id="fulltime-repeaters-list"><li>new</li></ul></body>"#
        );
    }

    #[test]
    fn test_html_sink_balances_nested_tags() {
        let mut sink = HtmlDocumentSink::new(
            "<div id='outer' class=\"x\"><div>a</div><div>b</div></div><p>after</p>",
        );
        sink.write("outer", "X".to_string());
        assert_eq!(sink.into_html(), "<div id='outer' class=\"x\">X</div><p>after</p>");
    }

    #[test]
    fn test_html_sink_missing_container() {
        let mut sink = HtmlDocumentSink::new("<ul id=\"other\"></ul>");
        assert!(!sink.has_container("quick-reference-table"));
        sink.write("quick-reference-table", "<tr></tr>".to_string());
        assert_eq!(sink.html(), "<ul id=\"other\"></ul>");
    }

    #[test]
    fn test_html_sink_ignores_data_id() {
        let sink = HtmlDocumentSink::new("<ul data-id=\"target\"></ul>");
        assert!(!sink.has_container("target"));
    }

    #[test]
    fn test_html_sink_id_prefix_is_not_a_match() {
        let sink = HtmlDocumentSink::new("<ul id=\"target-list\"></ul>");
        assert!(!sink.has_container("target"));
    }

    #[test]
    fn test_html_sink_void_element_is_absent() {
        let sink = HtmlDocumentSink::new("<input id=\"q\"><br id=\"b\"/>");
        assert!(!sink.has_container("q"));
        assert!(!sink.has_container("b"));
    }

    #[test]
    fn test_html_sink_unclosed_container_is_absent() {
        let sink = HtmlDocumentSink::new("<tbody id=\"quick-reference-table\"><tr>");
        assert!(!sink.has_container("quick-reference-table"));
    }

    #[test]
    fn test_html_sink_id_value_is_case_sensitive() {
        let sink = HtmlDocumentSink::new("<ul id=\"Target\"></ul>");
        assert!(!sink.has_container("target"));
        assert!(sink.has_container("Target"));
    }

    #[test]
    fn test_token_regex_compiles() {
        let caps = token_regex().captures("</tbody>").unwrap();
        assert_eq!(&caps[1], "/");
        assert_eq!(&caps[2], "tbody");

        let caps = token_regex().captures("<br id=\"b\"/>").unwrap();
        assert_eq!(&caps[3], " id=\"b\"");
        assert_eq!(&caps[4], "/");

        let caps = token_regex().captures("<!-- <ul> -->").unwrap();
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_has_id_quoting_styles() {
        assert!(has_id(" id=\"a\"", "a"));
        assert!(has_id(" class=x ID='a'", "a"));
        assert!(has_id(" id=a", "a"));
        assert!(!has_id(" data-id=\"a\"", "a"));
        assert!(!has_id(" id=\"b\" id=\"a\"", "a"));
        assert!(!has_id(" title=\"id=a\"", "a"));
    }

    #[test]
    fn test_html_sink_skips_container_mentioned_in_comment() {
        let page = "<!-- lists render into <ul id=\"fulltime-repeaters-list\"> below -->\n\
                    <ul id=\"fulltime-repeaters-list\"></ul>";
        let mut sink = HtmlDocumentSink::new(page);
        assert!(sink.has_container("fulltime-repeaters-list"));

        sink.write("fulltime-repeaters-list", "<li>Rome</li>".to_string());
        assert!(sink
            .html()
            .ends_with("<ul id=\"fulltime-repeaters-list\"><li>Rome</li></ul>"));
        assert!(sink.html().starts_with("<!-- lists render into <ul id="));
    }

    #[test]
    fn test_html_sink_comment_inside_container_is_not_counted() {
        let mut sink = HtmlDocumentSink::new("<ul id=\"t\"><!-- </ul> --><li>old</li></ul><p>x</p>");
        sink.write("t", "<li>new</li>".to_string());
        assert_eq!(sink.html(), "<ul id=\"t\"><li>new</li></ul><p>x</p>");
    }

    #[test]
    fn test_html_sink_quoted_gt_in_attribute() {
        let mut sink = HtmlDocumentSink::new(
            "<ul title=\"a > b\" id=\"t\"><li title='<ul>'>old</li></ul><ul><li>keep</li></ul>",
        );
        assert!(sink.has_container("t"));
        sink.write("t", "<li>new</li>".to_string());
        assert_eq!(
            sink.html(),
            "<ul title=\"a > b\" id=\"t\"><li>new</li></ul><ul><li>keep</li></ul>"
        );
    }

    #[test]
    fn test_html_sink_ignores_script_and_style_bodies() {
        let page = "<style>#t::before { content: \"<div id='t'>\"; }</style>\
                    <script>document.write('<div id=\"t\">');</script>\
                    <div id=\"t\"><script>var s = \"</div>\";</script>old</div>";
        let mut sink = HtmlDocumentSink::new(page);
        sink.write("t", "new".to_string());
        assert!(sink.html().ends_with("<div id=\"t\">new</div>"));
        assert!(sink.html().starts_with("<style>#t::before"));
    }

    #[test]
    fn test_html_sink_unterminated_comment_hides_rest() {
        let sink = HtmlDocumentSink::new("<!-- draft <ul id=\"t\"></ul>");
        assert!(!sink.has_container("t"));
    }

    #[test]
    fn test_html_sink_case_insensitive_tags() {
        let mut sink = HtmlDocumentSink::new("<TBODY ID=\"t\"><TR></TR></TBODY>");
        sink.write("t", "<tr>1</tr>".to_string());
        assert_eq!(sink.html(), "<TBODY ID=\"t\"><tr>1</tr></TBODY>");
    }
}
