//! Event rewriting that injects inline styles and heading ids.
//!
//! Events with a styled counterpart are replaced by raw HTML, headings are
//! passed back to the default writer with an id and a `style` attribute.
//! Closing tags of paragraphs, blockquotes, lists and links are left to the
//! default writer.

use super::heading::heading_text;
use crate::highlight::{escape_code, CodeHighlighter};
use crate::slug::HeadingIds;
use crate::style::StyleKey;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, LinkType, Tag, TagEnd};

/// Bytes escaped in `href` and `src`, existing `%XX` escapes are kept.
const URL_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

pub(crate) fn encode_url(url: &str) -> String {
    utf8_percent_encode(url, URL_ESCAPE).to_string()
}

/// Schemes that never become an `href` or `src`.
const BLOCKED_SCHEMES: [&str; 4] = ["javascript:", "vbscript:", "file:", "data:"];

/// `data:` URLs that stay allowed.
const IMAGE_DATA: [&str; 4] = [
    "data:image/gif;",
    "data:image/png;",
    "data:image/jpeg;",
    "data:image/webp;",
];

/// Whether a link or image destination may be emitted.
///
/// Refused links are rendered as their text, refused images as their alt.
pub(crate) fn is_allowed_url(url: &str) -> bool {
    let normalized = url
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .to_ascii_lowercase();

    IMAGE_DATA.iter().any(|prefix| normalized.starts_with(prefix))
        || !BLOCKED_SCHEMES
            .iter()
            .any(|scheme| normalized.starts_with(scheme))
}

#[derive(Debug, Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    fn cell_tag(&self) -> (&'static str, StyleKey) {
        if self.in_head {
            ("th", StyleKey::HeaderCell)
        } else {
            ("td", StyleKey::DataCell)
        }
    }

    fn cell_style(&self, key: StyleKey) -> String {
        let align = match self.alignments.get(self.cell_index) {
            Some(Alignment::Center) => "text-align:center;",
            Some(Alignment::Right) => "text-align:right;",
            // Cells are left-aligned by their declaration already.
            Some(Alignment::Left) | Some(Alignment::None) | None => "",
        };
        format!("{}{align}", key.declaration())
    }
}

/// Rewrites one parsed document, holds the per-pass state.
pub(crate) struct RuleWriter<'h> {
    highlighter: &'h CodeHighlighter,
    heading_ids: HeadingIds,
    table: TableState,
    /// One entry per open link, `false` when its anchor was refused.
    links: Vec<bool>,
    /// Whether the output so far ends with a newline.
    end_newline: bool,
}

impl<'h> RuleWriter<'h> {
    pub(crate) fn new(highlighter: &'h CodeHighlighter, heading_ids: HeadingIds) -> Self {
        Self {
            highlighter,
            heading_ids,
            table: TableState::default(),
            links: Vec::new(),
            end_newline: true,
        }
    }

    pub(crate) fn rewrite<'a>(&mut self, events: &[Event<'a>]) -> Vec<Event<'a>> {
        let mut processed = Vec::with_capacity(events.len());

        let mut i = 0;
        while i < events.len() {
            let rewritten = match &events[i] {
                Event::Start(Tag::Heading {
                    level,
                    id: _,
                    classes,
                    attrs,
                }) => {
                    let text = heading_text(&events[i + 1..]);
                    let id = self.heading_ids.next_id(&text);

                    let mut attrs = attrs.clone();
                    if let Some(key) = StyleKey::heading(*level) {
                        attrs.push(("style".into(), Some(key.declaration().into())));
                    }

                    Some(Event::Start(Tag::Heading {
                        level: *level,
                        id: Some(id.into()),
                        classes: classes.clone(),
                        attrs,
                    }))
                }
                Event::Start(Tag::Paragraph) => {
                    Some(self.open_block("p", StyleKey::Paragraph, ""))
                }
                Event::Start(Tag::BlockQuote) => {
                    Some(self.open_block("blockquote", StyleKey::Blockquote, "\n"))
                }
                Event::Start(Tag::List(None)) => {
                    Some(self.open_block("ul", StyleKey::UnorderedList, "\n"))
                }
                Event::Start(Tag::List(Some(1))) => {
                    Some(self.open_block("ol", StyleKey::OrderedList, "\n"))
                }
                Event::Start(Tag::List(Some(start))) => Some(self.block(format!(
                    "<ol start=\"{start}\" style=\"{}\">\n",
                    StyleKey::OrderedList.declaration()
                ))),
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id: _,
                }) => {
                    let href = match link_type {
                        LinkType::Email => format!("mailto:{dest_url}"),
                        _ => dest_url.to_string(),
                    };
                    let allowed = is_allowed_url(&href);
                    self.links.push(allowed);
                    allowed.then(|| inline_html(link_open(&href, title)))
                }
                Event::End(TagEnd::Link) => self
                    .links
                    .pop()
                    .unwrap_or(true)
                    .then(|| events[i].clone()),
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let (alt, end) = image_alt(&events[i + 1..]);
                    i += end + 1;
                    if is_allowed_url(dest_url) {
                        Some(inline_html(format!(
                            "<img src=\"{}\" alt=\"{alt}\" style=\"{}\">",
                            encode_url(dest_url),
                            StyleKey::Image.declaration()
                        )))
                    } else {
                        Some(Event::Text(alt.into()))
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let (code, end) = code_block_text(&events[i + 1..]);
                    i += end + 1;
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                        CodeBlockKind::Indented => None,
                    };
                    let highlighted = self.highlighter.highlight(&code, lang);
                    Some(self.block(format!(
                        "<pre style=\"{}\"><code>{highlighted}</code></pre>\n",
                        StyleKey::Pre.declaration()
                    )))
                }
                Event::Code(code) => Some(inline_html(format!(
                    "<code style=\"{}\">{}</code>",
                    StyleKey::InlineCode.declaration(),
                    escape_code(code)
                ))),
                Event::Rule => Some(self.block(format!(
                    "<hr style=\"{}\" />\n",
                    StyleKey::Rule.declaration()
                ))),
                Event::Start(Tag::Table(alignments)) => {
                    self.table = TableState {
                        alignments: alignments.clone(),
                        ..Default::default()
                    };
                    Some(self.open_block("table", StyleKey::Table, ""))
                }
                Event::End(TagEnd::Table) => {
                    self.table = TableState::default();
                    Some(html("</tbody></table>\n".to_string()))
                }
                Event::Start(Tag::TableHead) => {
                    self.table.in_head = true;
                    self.table.cell_index = 0;
                    Some(html("<thead><tr>".to_string()))
                }
                Event::End(TagEnd::TableHead) => {
                    self.table.in_head = false;
                    Some(html("</tr></thead><tbody>\n".to_string()))
                }
                Event::Start(Tag::TableRow) => {
                    self.table.cell_index = 0;
                    Some(html("<tr>".to_string()))
                }
                Event::End(TagEnd::TableRow) => Some(html("</tr>\n".to_string())),
                Event::Start(Tag::TableCell) => {
                    let (tag, key) = self.table.cell_tag();
                    Some(html(format!(
                        "<{tag} style=\"{}\">",
                        self.table.cell_style(key)
                    )))
                }
                Event::End(TagEnd::TableCell) => {
                    let (tag, _) = self.table.cell_tag();
                    self.table.cell_index += 1;
                    Some(html(format!("</{tag}>")))
                }
                event => Some(event.clone()),
            };

            if let Some(event) = rewritten {
                if let Some(end_newline) = ends_line(&event) {
                    self.end_newline = end_newline;
                }
                processed.push(event);
            }
            i += 1;
        }

        processed
    }

    /// Raw HTML for a block opener, on a line of its own like the default
    /// writer does.
    fn block<'a>(&self, content: String) -> Event<'a> {
        if self.end_newline {
            html(content)
        } else {
            html(format!("\n{content}"))
        }
    }

    fn open_block<'a>(&self, tag: &str, key: StyleKey, suffix: &str) -> Event<'a> {
        self.block(format!("<{tag} style=\"{}\">{suffix}", key.declaration()))
    }
}

/// Whether the default writer's output ends with a newline after `event`,
/// `None` when it writes nothing.
fn ends_line(event: &Event<'_>) -> Option<bool> {
    match event {
        Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
            (!text.is_empty()).then(|| text.ends_with('\n'))
        }
        Event::SoftBreak | Event::HardBreak | Event::Rule => Some(true),
        Event::Start(Tag::HtmlBlock) | Event::End(TagEnd::HtmlBlock) => None,
        Event::End(tag) => Some(matches!(
            tag,
            TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::BlockQuote
                | TagEnd::List(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::Table
                | TagEnd::TableHead
                | TagEnd::TableRow
        )),
        _ => Some(false),
    }
}

fn html<'a>(content: String) -> Event<'a> {
    Event::Html(CowStr::from(content))
}

fn inline_html<'a>(content: String) -> Event<'a> {
    Event::InlineHtml(CowStr::from(content))
}

fn link_open(href: &str, title: &str) -> String {
    let mut open = format!(
        "<a href=\"{}\"",
        html_escape::encode_double_quoted_attribute(&encode_url(href))
    );
    if !title.is_empty() {
        open.push_str(" title=\"");
        open.push_str(&html_escape::encode_double_quoted_attribute(title));
        open.push('"');
    }
    open.push_str(" style=\"");
    open.push_str(StyleKey::Link.declaration());
    open.push_str("\">");
    open
}

/// Collects the alt text of an image, returns it with the index of the
/// matching end event.
fn image_alt(events: &[Event<'_>]) -> (String, usize) {
    let mut alt = String::new();
    let mut depth = 1;

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Image { .. }) => depth += 1,
            Event::End(TagEnd::Image) => {
                depth -= 1;
                if depth == 0 {
                    return (alt, index);
                }
            }
            Event::Text(text) | Event::Code(text) => alt.push_str(text),
            _ => {}
        }
    }

    (alt, events.len())
}

/// Concatenates the text of a code block, returns it with the index of the
/// end event.
fn code_block_text(events: &[Event<'_>]) -> (String, usize) {
    let mut code = String::new();

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Text(text) => code.push_str(text),
            Event::End(TagEnd::CodeBlock) => return (code, index),
            _ => {}
        }
    }

    (code, events.len())
}
