//! Core library for rendering Markdown into inline-styled HTML.
//!
//! The target publishing platform strips `<style>` blocks and `class`
//! attributes from pasted content, so every visual property of the output is
//! carried by a `style` attribute on the element itself. Headings get stable
//! anchor ids and the same ids are used for the heading list and the table of
//! contents.
//!
//! # Modules
//!
//! - [`parse`] - Markdown parsing with linkify and typographic replacements
//! - [`render`] - Markdown to HTML conversion with inline styles
//! - [`style`] - Inline CSS declarations per element kind
//! - [`slug`] - Heading slugs and anchor ids
//! - [`highlight`] - Code block highlighting
//! - [`toc`] - Heading extraction and table of contents generation
//! - [`stats`] - Document statistics calculation
//! - [`config`] - Renderer configuration
//!
//! The HTML is not sanitized. Raw HTML in the input and image attributes pass
//! through as written, run the output through a sanitizer before inserting it
//! into a live page.

pub mod config;
pub mod error;
pub mod highlight;
pub mod parse;
pub mod render;
pub mod slug;
pub mod stats;
pub mod style;
pub mod toc;

// Re-export commonly used types at crate root
pub use config::{HighlightConfig, HighlightMode, RenderConfig};
pub use error::Error;
pub use render::{
    extract_headings, render_document, render_markdown, MarkdownRenderer, Rendered,
};
pub use slug::{heading_id, slug, HeadingIdPolicy};
pub use stats::{calculate_document_stats, DocumentStats};
pub use style::{style_for, StyleKey};
pub use toc::{generate_toc, Heading, TocConfig};
