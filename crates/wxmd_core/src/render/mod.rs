//! Markdown to inline-styled HTML rendering.
//!
//! This module provides the [`MarkdownRenderer`] which turns a Markdown
//! document into HTML where every styled element carries its CSS in a `style`
//! attribute:
//! - Headings get an anchor id derived from their text
//! - Paragraphs, quotes, lists, links, images, rules and tables are styled
//! - Code blocks are highlighted with inline colors
//!
//! The output is not sanitized, raw HTML in the input passes through.

mod heading;
mod rules;

pub(crate) use heading::heading_text;

use crate::config::RenderConfig;
use crate::error::Error;
use crate::highlight::CodeHighlighter;
use crate::parse::parse;
use crate::slug::HeadingIds;
use crate::toc::{collect_headings, Heading};
use once_cell::sync::Lazy;
use pulldown_cmark::Event;
use rules::RuleWriter;
use serde::{Deserialize, Serialize};

static DEFAULT_RENDERER: Lazy<MarkdownRenderer> = Lazy::new(MarkdownRenderer::default);

/// HTML and headings produced from a single parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    pub html: String,
    pub headings: Vec<Heading>,
}

/// Markdown document renderer.
///
/// Built once from a [`RenderConfig`] and never modified afterwards, a single
/// instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    config: RenderConfig,
    highlighter: CodeHighlighter,
}

impl MarkdownRenderer {
    /// Creates a renderer, fails if the highlight theme does not exist.
    pub fn new(config: RenderConfig) -> Result<Self, Error> {
        let highlighter = CodeHighlighter::new(&config.highlight)?;
        Ok(Self {
            config,
            highlighter,
        })
    }

    /// Creates a renderer from a TOML config.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Self::new(RenderConfig::from_toml_str(s)?)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `text` to HTML.
    pub fn render(&self, text: &str) -> String {
        let events = parse(text);
        self.render_events(text, &events)
    }

    /// Returns the headings of `text` in document order.
    ///
    /// Ids are identical to the ones [`MarkdownRenderer::render`] puts on the
    /// heading elements.
    pub fn extract_headings(&self, text: &str) -> Vec<Heading> {
        collect_headings(&parse(text), self.heading_ids())
    }

    /// Renders `text` and extracts its headings from the same parse.
    pub fn render_document(&self, text: &str) -> Rendered {
        let events = parse(text);
        Rendered {
            headings: collect_headings(&events, self.heading_ids()),
            html: self.render_events(text, &events),
        }
    }

    fn heading_ids(&self) -> HeadingIds {
        HeadingIds::new(self.config.heading_ids)
    }

    fn render_events(&self, text: &str, events: &[Event<'_>]) -> String {
        let mut writer = RuleWriter::new(&self.highlighter, self.heading_ids());
        let processed = writer.rewrite(events);

        let mut html_output = String::with_capacity(text.len() * 2);
        pulldown_cmark::html::push_html(&mut html_output, processed.into_iter());

        tracing::debug!(
            input_len = text.len(),
            events = events.len(),
            html_len = html_output.len(),
            "Rendered markdown"
        );

        html_output
    }
}

/// Renders `text` with the default configuration.
///
/// # Example
///
/// ```
/// use wxmd_core::render::render_markdown;
///
/// let html = render_markdown("# Hello\n\nWorld");
/// assert!(html.starts_with("<h1 id=\"h-hello\" style=\""));
/// assert!(html.contains("<p style=\""));
/// ```
pub fn render_markdown(text: &str) -> String {
    DEFAULT_RENDERER.render(text)
}

/// Extracts the headings of `text` with the default configuration.
///
/// ```
/// use wxmd_core::render::extract_headings;
///
/// let headings = extract_headings("# One\n\n## Two");
/// assert_eq!(headings[1].id, "h-two");
/// assert_eq!(headings[1].level, 2);
/// ```
pub fn extract_headings(text: &str) -> Vec<Heading> {
    DEFAULT_RENDERER.extract_headings(text)
}

/// Renders `text` and extracts its headings with the default configuration.
pub fn render_document(text: &str) -> Rendered {
    DEFAULT_RENDERER.render_document(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HighlightConfig, HighlightMode};
    use crate::slug::HeadingIdPolicy;
    use crate::style::StyleKey;

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
        assert!(extract_headings("").is_empty());
        assert_eq!(render_document(""), Rendered::default());
    }

    #[test]
    fn test_renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownRenderer>();
    }

    #[test]
    fn test_unknown_theme_fails_at_construction() {
        let err = MarkdownRenderer::from_toml_str("[highlight]\ntheme = \"Nope\"").unwrap_err();
        assert!(matches!(err, Error::UnknownTheme(_)));
    }

    #[test]
    fn test_render_document_matches_separate_calls() {
        let input = "# A\n\ntext\n\n## B\n\n# A\n";
        let rendered = render_document(input);
        assert_eq!(rendered.html, render_markdown(input));
        assert_eq!(rendered.headings, extract_headings(input));
    }

    #[test]
    fn test_numbered_ids_agree() {
        let renderer = MarkdownRenderer::new(RenderConfig {
            heading_ids: HeadingIdPolicy::Numbered,
            ..Default::default()
        })
        .unwrap();

        let input = "# Intro\n\n## Intro\n\n### Intro";
        let rendered = renderer.render_document(input);
        let ids: Vec<_> = rendered.headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["h-intro", "h-intro-1", "h-intro-2"]);
        for id in ids {
            assert!(rendered.html.contains(&format!("id=\"{id}\"")));
        }
    }

    #[test]
    fn test_classed_mode_still_styles_pre() {
        let renderer = MarkdownRenderer::new(RenderConfig {
            highlight: HighlightConfig {
                mode: HighlightMode::Classed,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

        let html = renderer.render("```rust\nlet a = 1;\n```\n");
        assert!(html.starts_with(&format!("<pre style=\"{}\">", StyleKey::Pre.declaration())));
        assert!(html.contains("class=\""));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_markdown("<div align=\"center\">hi</div>\n");
        assert_eq!(html, "<div align=\"center\">hi</div>\n");
    }
}
