//! Markdown parsing into the event stream consumed by the renderer and the
//! heading extractor.
//!
//! pulldown-cmark does the parsing. Two passes over its text events then add
//! what the parser lacks: bare links become autolinks and the remaining
//! typographic replacements are applied. Code, images and autolinks are left
//! alone.

mod linkify;
mod typography;

pub use linkify::{find_links, LinkKind, LinkMatch};
pub use typography::replace_typography;

use crate::config::parser_options;
use pulldown_cmark::{CowStr, Event, LinkType, Parser, Tag, TagEnd, TextMergeStream};
use std::borrow::Cow;

/// Parses `text` into events.
///
/// The result only depends on `text`, two calls on the same input produce
/// equal streams. The content of an image is replaced by a single text event
/// holding the raw source of its label.
pub fn parse(text: &str) -> Vec<Event<'_>> {
    let (parsed, ranges): (Vec<_>, Vec<_>) = Parser::new_ext(text, parser_options())
        .into_offset_iter()
        .unzip();
    let mut image_labels = parsed
        .iter()
        .zip(ranges)
        .filter(|(event, _)| matches!(event, Event::Start(Tag::Image { .. })))
        .map(|(_, range)| image_label(&text[range]))
        .collect::<Vec<_>>()
        .into_iter();

    let mut scope = TextScope::default();
    let mut events = Vec::new();
    // Nesting depth inside an image whose label was already emitted.
    let mut skipped_image_depth = 0usize;

    for event in TextMergeStream::new(parsed.into_iter()) {
        if skipped_image_depth > 0 {
            match event {
                Event::Start(Tag::Image { .. }) => {
                    image_labels.next();
                    skipped_image_depth += 1;
                }
                Event::End(TagEnd::Image) => {
                    skipped_image_depth -= 1;
                    if skipped_image_depth == 0 {
                        events.push(event);
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::Image { .. }) => {
                let label = image_labels.next().flatten();
                events.push(event);
                if let Some(label) = label {
                    if !label.is_empty() {
                        events.push(Event::Text(CowStr::Borrowed(label)));
                    }
                    skipped_image_depth = 1;
                }
            }
            Event::Text(text) => match scope.treatment() {
                Treatment::Verbatim => events.push(Event::Text(text)),
                Treatment::Typography => events.push(Event::Text(typographed(text))),
                Treatment::Prose => push_prose(text, &mut events),
            },
            event => {
                scope.update(&event);
                events.push(event);
            }
        }
    }

    events
}

/// Returns the raw label of an image from its source, `![label](…)`.
fn image_label(source: &str) -> Option<&str> {
    let label = source.strip_prefix("![")?;

    let mut depth = 0usize;
    let mut escaped = false;
    for (index, c) in label.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' if depth == 0 => return Some(&label[..index]),
            ']' => depth -= 1,
            _ => {}
        }
    }

    None
}

enum Treatment {
    Verbatim,
    Typography,
    Prose,
}

/// Tracks which container the next text event belongs to.
#[derive(Debug, Default)]
struct TextScope {
    code_blocks: usize,
    /// One entry per open link, `true` for autolinks.
    links: Vec<bool>,
    /// Open raw `<a>` elements.
    html_links: usize,
}

impl TextScope {
    fn update(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => self.code_blocks += 1,
            Event::End(TagEnd::CodeBlock) => self.code_blocks = self.code_blocks.saturating_sub(1),
            Event::Start(Tag::Link { link_type, .. }) => self
                .links
                .push(matches!(link_type, LinkType::Autolink | LinkType::Email)),
            Event::End(TagEnd::Link) => {
                self.links.pop();
            }
            Event::InlineHtml(html) if is_anchor_open(html) => self.html_links += 1,
            Event::InlineHtml(html) if is_anchor_close(html) => {
                self.html_links = self.html_links.saturating_sub(1)
            }
            _ => {}
        }
    }

    fn treatment(&self) -> Treatment {
        if self.code_blocks > 0 {
            return Treatment::Verbatim;
        }
        match self.links.last() {
            Some(true) => Treatment::Verbatim,
            Some(false) => Treatment::Typography,
            None if self.html_links > 0 => Treatment::Typography,
            None => Treatment::Prose,
        }
    }
}

fn is_anchor_open(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.len() > 2
        && bytes[0] == b'<'
        && bytes[1].eq_ignore_ascii_case(&b'a')
        && (bytes[2] == b'>' || bytes[2].is_ascii_whitespace())
}

fn is_anchor_close(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.len() > 3
        && bytes.starts_with(b"</")
        && bytes[2].eq_ignore_ascii_case(&b'a')
        && (bytes[3] == b'>' || bytes[3].is_ascii_whitespace())
}

fn typographed(text: CowStr<'_>) -> CowStr<'_> {
    let replaced = match replace_typography(&text) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    };
    replaced.map(CowStr::from).unwrap_or(text)
}

/// Splits prose text around bare links and wraps each link in link events.
fn push_prose<'a>(text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
    let links = find_links(&text);
    if links.is_empty() {
        events.push(Event::Text(typographed(text)));
        return;
    }

    let mut cursor = 0;
    for link in links {
        let before = &text[cursor..link.range.start];
        if !before.is_empty() {
            events.push(Event::Text(
                replace_typography(before).into_owned().into(),
            ));
        }

        let link_type = match link.kind {
            LinkKind::Email => LinkType::Email,
            LinkKind::Url | LinkKind::Www => LinkType::Autolink,
        };
        events.push(Event::Start(Tag::Link {
            link_type,
            dest_url: link.destination(&text).into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(text[link.range.clone()].to_string().into()));
        events.push(Event::End(TagEnd::Link));

        cursor = link.range.end;
    }

    let rest = &text[cursor..];
    if !rest.is_empty() {
        events.push(Event::Text(replace_typography(rest).into_owned().into()));
    }
}
