//! Heading extraction and table of contents generation.
//!
//! This module provides functionality to:
//! - Collect the headings of a parsed document with their anchor ids
//! - Format them as a Markdown list of links, ready to paste into the document

use crate::render::heading_text;
use crate::slug::HeadingIds;
use pulldown_cmark::{Event, Tag};
use serde::{Deserialize, Serialize};

/// A heading of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Anchor id, identical to the `id` attribute in the rendered HTML.
    pub id: String,
    /// Heading level, 1 to 6.
    pub level: u8,
    /// Plain text of the heading.
    pub text: String,
}

/// Collects the headings of `events` in document order.
pub(crate) fn collect_headings(events: &[Event<'_>], mut ids: HeadingIds) -> Vec<Heading> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, event)| match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let text = heading_text(&events[i + 1..]);
                Some(Heading {
                    id: ids.next_id(&text),
                    level: *level as u8,
                    text,
                })
            }
            _ => None,
        })
        .collect()
}

/// Configuration for table of contents generation.
#[derive(Debug, Clone)]
pub struct TocConfig {
    /// Bullet character for list items (default: "*")
    pub bullet: String,
    /// Number of spaces per indent level (default: 2)
    pub indent: usize,
    /// Maximum heading level to include (default: None, include all)
    pub max_depth: Option<u8>,
    /// Minimum heading level to include, also the unindented level (default: 1)
    pub min_depth: u8,
    /// If true, generate plain text without links (default: false)
    pub no_link: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            bullet: String::from("*"),
            indent: 2,
            max_depth: None,
            min_depth: 1,
            no_link: false,
        }
    }
}

impl Heading {
    /// Format the heading as a TOC entry according to the given config.
    ///
    /// Returns `None` when the heading level is outside the configured range.
    pub fn format(&self, config: &TocConfig) -> Option<String> {
        if self.level < config.min_depth || config.max_depth.is_some_and(|d| self.level > d) {
            return None;
        }

        let indent_before_bullet = " "
            .repeat(config.indent)
            .repeat(usize::from(self.level - config.min_depth));
        let bullet = &config.bullet;
        let indent_after_bullet = " ".repeat(config.indent.saturating_sub(1).max(1));

        if config.no_link {
            Some(format!(
                "{indent_before_bullet}{bullet}{indent_after_bullet}{}",
                self.text
            ))
        } else {
            Some(format!(
                "{indent_before_bullet}{bullet}{indent_after_bullet}[{}]({})",
                escape_link_text(&self.text),
                anchor(&self.id)
            ))
        }
    }
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Link destination for an id, bracketed when it holds parentheses.
fn anchor(id: &str) -> String {
    if id.contains(['(', ')']) {
        format!("<#{id}>")
    } else {
        format!("#{id}")
    }
}

/// Generate a table of contents for a markdown document.
///
/// Headings are extracted with the default configuration, so the links point
/// at the ids of [`crate::render::render_markdown`].
///
/// # Example
///
/// ```
/// use wxmd_core::toc::{generate_toc, TocConfig};
///
/// let toc = generate_toc("# Guide\n\n## Getting Started", &TocConfig::default());
/// assert_eq!(toc, vec!["* [Guide](#h-guide)", "  * [Getting Started](#h-getting-started)"]);
/// ```
pub fn generate_toc(text: &str, config: &TocConfig) -> Vec<String> {
    format_toc(&crate::render::extract_headings(text), config)
}

/// Formats already extracted headings, see [`Heading::format`].
pub fn format_toc(headings: &[Heading], config: &TocConfig) -> Vec<String> {
    headings
        .iter()
        .filter_map(|heading| heading.format(config))
        .collect()
}
