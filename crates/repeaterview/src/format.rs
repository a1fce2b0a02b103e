//! Display strings derived from a single repeater.
//!
//! Everything here is pure. Missing fields render as empty text rather than
//! failing, so a sparse record still produces a (sparse) line.

use crate::repeater::{present, LinkType, Repeater};

/// A CSS class paired with its visible text, as used by the badge spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Class appended after the badge kind (`status <class>`).
    pub class: String,
    /// Text inside the badge.
    pub text: String,
}

/// Field text, or empty when missing.
pub(crate) fn text(field: Option<&String>) -> &str {
    field.map_or("", String::as_str)
}

/// Upper-cases the first character and leaves the rest alone.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"<frequency><offset> (<tone>[ Tone])"`.
///
/// `toneText` replaces the raw tone when present. The ` Tone` suffix is added
/// only for a raw tone, never after `toneText`.
#[must_use]
pub fn format_frequency(r: &Repeater) -> String {
    let raw_tone = r.tone.as_ref().filter(|t| t.is_set());
    let tone_text = present(r.tone_text.as_ref());

    let tone_display = match (tone_text, r.tone.as_ref()) {
        (Some(text), _) => text.to_string(),
        (None, Some(tone)) => tone.to_string(),
        (None, None) => String::new(),
    };
    let suffix = if raw_tone.is_some() && tone_text.is_none() {
        " Tone"
    } else {
        ""
    };

    format!(
        "{}{} ({tone_display}{suffix})",
        text(r.frequency.as_ref()),
        text(r.offset.as_ref()),
    )
}

/// `"<frequency><offset> (<tone>) • <callsign>"`, always with the raw tone.
#[must_use]
pub fn format_frequency_with_callsign(r: &Repeater) -> String {
    let tone = r.tone.as_ref().map(ToString::to_string).unwrap_or_default();
    format!(
        "{}{} ({tone}) \u{2022} {}",
        text(r.frequency.as_ref()),
        text(r.offset.as_ref()),
        text(r.callsign.as_ref()),
    )
}

/// Status badge: class is the raw status, text is `statusText` or the
/// capitalized status.
#[must_use]
pub fn status_display(r: &Repeater) -> Badge {
    let status = text(r.status.as_ref());
    let text = present(r.status_text.as_ref()).map_or_else(|| capitalize(status), str::to_string);
    Badge {
        class: status.to_string(),
        text,
    }
}

/// Link-type badge. Unknown values pass through as both class and text.
#[must_use]
pub fn link_type_display(r: &Repeater) -> Badge {
    let raw = text(r.link_type.as_ref());
    let text = r
        .link_kind()
        .map_or_else(|| raw.to_string(), |lt: LinkType| lt.label().to_string());
    Badge {
        class: raw.to_string(),
        text,
    }
}

/// `locationShort` when set, otherwise `location`.
#[must_use]
pub fn short_location(r: &Repeater) -> &str {
    present(r.location_short.as_ref()).unwrap_or_else(|| text(r.location.as_ref()))
}

/// Location for the detailed list.
///
/// With `locationDetail`, the parenthetical part of `location` is replaced:
/// `"Atlanta (Downtown)"` + `"City Hall"` gives `"Atlanta (City Hall)"`.
#[must_use]
pub fn detail_location(r: &Repeater) -> String {
    let location = text(r.location.as_ref());
    match present(r.location_detail.as_ref()) {
        Some(detail) => {
            let base = location.split('(').next().unwrap_or_default().trim();
            format!("{base} ({detail})")
        }
        None => location.to_string(),
    }
}

/// `"Sponsors"` for a list of sponsors, `"Sponsor"` otherwise.
#[must_use]
pub fn sponsor_label(sponsor: &str) -> &'static str {
    if sponsor.contains(" and ") || sponsor.contains(',') {
        "Sponsors"
    } else {
        "Sponsor"
    }
}

/// Whether the record is flagged historic through its feature notes.
#[must_use]
pub fn is_historic(r: &Repeater) -> bool {
    r.features.as_deref().is_some_and(|f| f.contains("Historic"))
}
