//! Heading text shared by the renderer and the heading extractor.

use pulldown_cmark::{Event, TagEnd};

/// Returns the plain text of a heading.
///
/// `events` starts right after the heading's start event. Text and inline code
/// are concatenated up to the end of the heading, any other markup is ignored.
pub(crate) fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(content),
            Event::End(TagEnd::Heading(_)) => break,
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn first_heading_text(input: &str) -> String {
        let events = parse(input);
        heading_text(&events[1..])
    }

    #[test]
    fn test_markup_is_ignored() {
        assert_eq!(first_heading_text("# Hello *big* `World`"), "Hello big World");
        assert_eq!(first_heading_text("## [Link](https://example.com) text"), "Link text");
    }

    #[test]
    fn test_stops_at_heading_end() {
        assert_eq!(first_heading_text("# One\n\nTwo"), "One");
    }

    #[test]
    fn test_empty_heading() {
        assert_eq!(first_heading_text("#"), "");
    }
}
