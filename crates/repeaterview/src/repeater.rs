//! Repeater records and the document that holds them.
//!
//! Records mirror the JSON document one-to-one. Every field is optional and
//! nothing is validated: a record missing fields still renders, just with
//! blanks where the data would be.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three link types the grouped views know about.
///
/// Records carry `linkType` as free text; this is the typed view over the known
/// values. Anything else has no `LinkType` and falls out of every grouped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Linked into the intertie at all times.
    Fulltime,
    /// Linked on a schedule or on demand.
    Parttime,
    /// Dedicated to SKYWARN weather nets.
    Skywarn,
}

impl LinkType {
    /// All known link types in page order.
    pub const ALL: [LinkType; 3] = [Self::Fulltime, Self::Parttime, Self::Skywarn];

    /// The value as it appears in the data file and in CSS classes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fulltime => "fulltime",
            Self::Parttime => "parttime",
            Self::Skywarn => "skywarn",
        }
    }

    /// Human-readable badge label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fulltime => "Full-Time",
            Self::Parttime => "Part-Time",
            Self::Skywarn => "SKYWARN",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = ();

    /// Exact, case-sensitive match on the data-file spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fulltime" => Ok(Self::Fulltime),
            "parttime" => Ok(Self::Parttime),
            "skywarn" => Ok(Self::Skywarn),
            _ => Err(()),
        }
    }
}

/// An access tone, stored either as a code string or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tone {
    /// Tone given as text, e.g. `"100.0"` or `"D023"`.
    Text(String),
    /// Tone given as a JSON number, e.g. `100` or `131.8`.
    Number(serde_json::Number),
}

impl Tone {
    /// Whether the tone counts as set. Empty text and zero do not.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Tone {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single repeater record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Repeater {
    /// Anchor id linking the quick-reference table to the detailed entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Output frequency, e.g. `"146.880"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    /// Offset direction shown after the frequency, e.g. `"-"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    /// Raw access tone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,

    /// Pre-formatted tone text that replaces `tone` in summary views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_text: Option<String>,

    /// Operational status, also used as a CSS class (`active`, `inactive`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Display override for `status`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Link type as written in the data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,

    /// Full location, possibly with a parenthetical site name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Short location for lists and the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_short: Option<String>,

    /// Site detail that replaces the parenthetical part of `location`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,

    /// Station callsign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,

    /// Free-form feature notes. The token `Historic` marks a historic machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,

    /// Coverage area description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<String>,

    /// Sponsor or sponsors, joined with commas or "and".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,

    /// Owning club.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,

    /// Role within the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Marks the system hub repeater.
    pub is_hub: bool,
}

impl Repeater {
    /// The typed link type, or `None` when the value is missing or unknown.
    #[must_use]
    pub fn link_kind(&self) -> Option<LinkType> {
        self.link_type.as_deref().and_then(|s| s.parse().ok())
    }

    /// Whether this record belongs to the given group.
    #[must_use]
    pub fn is_link_type(&self, link_type: LinkType) -> bool {
        self.link_type.as_deref() == Some(link_type.as_str())
    }
}

/// Treats empty strings the same as missing ones.
pub(crate) fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

/// The loaded repeater document.
///
/// Built once, never mutated, and handed to renderers by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepeaterData {
    /// Records in document order.
    #[serde(default)]
    pub repeaters: Vec<Repeater>,
}

impl RepeaterData {
    /// Wrap an already-built list of records.
    #[must_use]
    pub fn new(repeaters: Vec<Repeater>) -> Self {
        Self { repeaters }
    }

    /// Records of one link type, in document order.
    pub fn by_link_type(&self, link_type: LinkType) -> impl Iterator<Item = &Repeater> {
        self.repeaters
            .iter()
            .filter(move |r| r.is_link_type(link_type))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.repeaters.len()
    }

    /// Whether the document holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repeaters.is_empty()
    }
}
