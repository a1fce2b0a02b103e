//! Summary lists for the index page.

use crate::format::{format_frequency, link_type_display, short_location, status_display};
use crate::repeater::{LinkType, Repeater, RepeaterData};
use crate::sink::{Container, ViewSink};

use super::fill;

/// Compact list item: location, frequency and the two badges.
#[must_use]
pub fn render_simple_list_item(r: &Repeater) -> String {
    let status = status_display(r);
    let link_type = link_type_display(r);

    format!(
        "\n<li class=\"repeater-item\">\
         \n    <span class=\"repeater-name\">{location}</span>\
         \n    <span class=\"repeater-frequency\">{frequency}</span>\
         \n    <span class=\"status {status_class}\">{status_text}</span>\
         \n    <span class=\"linktype {link_class}\">{link_text}</span>\
         \n</li>\n",
        location = short_location(r),
        frequency = format_frequency(r),
        status_class = status.class,
        status_text = status.text,
        link_class = link_type.class,
        link_text = link_type.text,
    )
}

/// Fill the three index lists, one per link type, in document order.
///
/// Records with any other link type appear in none of them.
pub fn render_index_repeaters(data: &RepeaterData, sink: &mut dyn ViewSink) {
    for link_type in LinkType::ALL {
        fill(sink, Container::summary_list(link_type), || {
            data.by_link_type(link_type)
                .map(render_simple_list_item)
                .collect()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repeater::Tone;
    use crate::sink::FragmentSink;

    fn repeater(id: &str, link_type: &str, location: &str) -> Repeater {
        Repeater {
            id: Some(id.to_string()),
            frequency: Some("147.000".to_string()),
            offset: Some("+".to_string()),
            tone: Some(Tone::from("141.3")),
            status: Some("active".to_string()),
            link_type: Some(link_type.to_string()),
            location: Some(location.to_string()),
            ..Repeater::default()
        }
    }

    #[test]
    fn test_simple_list_item() {
        let mut r = repeater("r1", "parttime", "Stone Mountain (Summit)");
        r.location_short = Some("Stone Mtn".to_string());

        let html = render_simple_list_item(&r);
        assert!(html.contains(r#"<li class="repeater-item">"#));
        assert!(html.contains(r#"<span class="repeater-name">Stone Mtn</span>"#));
        assert!(html.contains(r#"<span class="repeater-frequency">147.000+ (141.3 Tone)</span>"#));
        assert!(html.contains(r#"<span class="status active">Active</span>"#));
        assert!(html.contains(r#"<span class="linktype parttime">Part-Time</span>"#));
        assert!(!html.contains("id="));
    }

    #[test]
    fn test_index_groups_partition_in_order() {
        let data = RepeaterData::new(vec![
            repeater("a", "fulltime", "Alpha"),
            repeater("b", "skywarn", "Bravo"),
            repeater("c", "parttime", "Charlie"),
            repeater("d", "fulltime", "Delta"),
            repeater("e", "allstar", "Echo"),
            repeater("f", "skywarn", "Foxtrot"),
        ]);
        let mut sink = FragmentSink::accept_all();
        render_index_repeaters(&data, &mut sink);

        let full = sink.get("fulltime-repeaters-list").unwrap();
        let part = sink.get("parttime-repeaters-list").unwrap();
        let sky = sink.get("skywarn-repeaters-list").unwrap();

        let alpha = full.find("Alpha").unwrap();
        let delta = full.find("Delta").unwrap();
        assert!(alpha < delta);
        assert!(part.contains("Charlie"));
        assert!(sky.find("Bravo").unwrap() < sky.find("Foxtrot").unwrap());

        for name in ["Alpha", "Bravo", "Charlie", "Delta", "Foxtrot"] {
            let hits = [full, part, sky].iter().filter(|g| g.contains(name)).count();
            assert_eq!(hits, 1, "{name} should be in exactly one group");
        }
        assert!(![full, part, sky].iter().any(|g| g.contains("Echo")));
    }

    #[test]
    fn test_index_empty_group_writes_empty_markup() {
        let data = RepeaterData::new(vec![repeater("a", "fulltime", "Alpha")]);
        let mut sink = FragmentSink::accept_all();
        render_index_repeaters(&data, &mut sink);
        assert_eq!(sink.get("skywarn-repeaters-list"), Some(""));
    }

    #[test]
    fn test_index_missing_container_leaves_others() {
        let data = RepeaterData::new(vec![
            repeater("a", "fulltime", "Alpha"),
            repeater("b", "skywarn", "Bravo"),
        ]);
        let mut sink =
            FragmentSink::with_containers(["fulltime-repeaters-list", "skywarn-repeaters-list"]);
        render_index_repeaters(&data, &mut sink);

        assert!(sink.get("fulltime-repeaters-list").unwrap().contains("Alpha"));
        assert!(sink.get("skywarn-repeaters-list").unwrap().contains("Bravo"));
        assert!(sink.get("parttime-repeaters-list").is_none());
    }
}
