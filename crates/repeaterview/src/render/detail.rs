//! The repeaters page: quick reference table and detailed lists.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::format::{
    detail_location, format_frequency_with_callsign, is_historic, link_type_display,
    short_location, sponsor_label, status_display, text,
};
use crate::repeater::{present, LinkType, Repeater, RepeaterData};
use crate::sink::{Container, ViewSink};

use super::fill;

const CELL_STYLE: &str = "padding: 8px; border: 1px solid #ddd;";
const SHADED_ROW: &str = " style=\"background-color: #f9f9f9;\"";

const HUB_STYLE: &str = " background-color: #f0f8ff; border-left: 3px solid var(--primary-blue);";
const HISTORIC_STYLE: &str =
    " background-color: #fff8dc; border-left: 3px solid var(--green-accent);";

const HUB_NOTE: &str = "<strong>System Hub Repeater</strong> - All intertie traffic is processed through this UHF hub<br>";
const HUB_POWER_NOTE: &str =
    "<em>Features: Emergency power generator with automatic transfer switch</em><br>";
const HISTORIC_NOTE: &str =
    "<strong>Historic Repeater</strong> - One of the oldest repeaters in Georgia<br>";

/// Collation key for a place name: base letters first, then accents.
///
/// Case is ignored at both levels. `Éton` files next to `Eton`, before
/// `Fairburn`, and after a plain `Eton` when the two otherwise tie.
fn location_sort_key(location: &str) -> (String, String) {
    let lower = location.to_lowercase();
    let base = lower.nfd().filter(|c| !is_combining_mark(*c)).collect();
    (base, lower.nfd().collect())
}

/// Non-SKYWARN repeaters sorted by short location, ignoring case and
/// comparing accented letters by their base letter.
///
/// The sort is stable, so equal locations keep their document order.
#[must_use]
pub fn quick_reference_order(data: &RepeaterData) -> Vec<&Repeater> {
    let mut rows: Vec<&Repeater> = data
        .repeaters
        .iter()
        .filter(|r| !r.is_link_type(LinkType::Skywarn))
        .collect();
    rows.sort_by_cached_key(|r| location_sort_key(short_location(r)));
    rows
}

/// One quick reference row. Odd rows (zero-based, after sorting) are shaded.
#[must_use]
pub fn render_table_row(r: &Repeater, index: usize) -> String {
    let status = status_display(r);
    let link_type = link_type_display(r);
    let shade = if index % 2 == 0 { "" } else { SHADED_ROW };
    let tone = r.tone.as_ref().map(ToString::to_string).unwrap_or_default();
    let callsign = present(r.callsign.as_ref()).unwrap_or("N/A");

    format!(
        "\n<tr{shade}>\
         \n    <td style=\"{CELL_STYLE}\"><strong>{frequency}{offset}</strong></td>\
         \n    <td style=\"{CELL_STYLE}\"><a href=\"#{id}\" style=\"color: var(--primary-blue); text-decoration: none;\">{location}</a></td>\
         \n    <td style=\"{CELL_STYLE}\">{tone}</td>\
         \n    <td style=\"{CELL_STYLE}\">{callsign}</td>\
         \n    <td style=\"{CELL_STYLE} text-align: center;\"><span class=\"status {status_class}\">{status_text}</span> <span class=\"linktype {link_class}\">{link_text}</span></td>\
         \n</tr>\n",
        frequency = text(r.frequency.as_ref()),
        offset = text(r.offset.as_ref()),
        id = text(r.id.as_ref()),
        location = short_location(r),
        status_class = status.class,
        status_text = status.text,
        link_class = link_type.class,
        link_text = link_type.text,
    )
}

/// Notes block shown under a detailed entry.
///
/// Hub takes precedence over historic, and both replace the free-form
/// features line. Coverage, sponsor, club and function follow regardless.
fn render_details(r: &Repeater) -> String {
    let historic = is_historic(r);
    let mut html = String::from("<li style=\"margin-left: 20px; padding: 10px;");

    if r.is_hub {
        html.push_str(HUB_STYLE);
    } else if historic {
        html.push_str(HISTORIC_STYLE);
    }
    html.push_str("\">");

    if r.is_hub {
        html.push_str(HUB_NOTE);
        html.push_str(HUB_POWER_NOTE);
    } else if historic {
        html.push_str(HISTORIC_NOTE);
    } else if let Some(features) = present(r.features.as_ref()) {
        html.push_str(&format!("<strong>Features:</strong> {features}<br>"));
    }

    if let Some(coverage) = present(r.coverage.as_ref()) {
        html.push_str(&format!("<strong>Coverage:</strong> {coverage}<br>"));
    }
    if let Some(sponsor) = present(r.sponsor.as_ref()) {
        let label = sponsor_label(sponsor);
        html.push_str(&format!("<strong>{label}:</strong> {sponsor}<br>"));
    }
    if let Some(club) = present(r.club.as_ref()) {
        html.push_str(&format!("<strong>Club:</strong> {club}<br>"));
    }
    if let Some(function) = present(r.function.as_ref()) {
        html.push_str(&format!("<strong>Function:</strong> {function}"));
    }

    html.push_str("</li>");
    html
}

/// Detailed entry: an anchored summary row followed by its notes block.
#[must_use]
pub fn render_detailed_list_item(r: &Repeater) -> String {
    let status = status_display(r);
    let link_type = link_type_display(r);

    format!(
        "\n<li class=\"repeater-item\" id=\"{id}\">\
         \n    <span class=\"repeater-name\">{location}</span>\
         \n    <span class=\"repeater-frequency\">{frequency}</span>\
         \n    <span class=\"status {status_class}\">{status_text}</span>\
         \n    <span class=\"linktype {link_class}\">{link_text}</span>\
         \n</li>\
         \n{details}\n",
        id = text(r.id.as_ref()),
        location = detail_location(r),
        frequency = format_frequency_with_callsign(r),
        status_class = status.class,
        status_text = status.text,
        link_class = link_type.class,
        link_text = link_type.text,
        details = render_details(r),
    )
}

/// Fill the quick reference table and the three detailed lists.
pub fn render_repeaters_page(data: &RepeaterData, sink: &mut dyn ViewSink) {
    fill(sink, Container::QuickReferenceTable, || {
        quick_reference_order(data)
            .into_iter()
            .enumerate()
            .map(|(i, r)| render_table_row(r, i))
            .collect()
    });

    for link_type in LinkType::ALL {
        fill(sink, Container::detailed_list(link_type), || {
            data.by_link_type(link_type)
                .map(render_detailed_list_item)
                .collect()
        });
    }
}
