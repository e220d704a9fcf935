//! Inline CSS declarations for every element kind the renderer styles.
//!
//! The target platform drops `<style>` blocks and `class` attributes on paste,
//! so each styled element carries its declaration in a `style` attribute.

use pulldown_cmark::HeadingLevel;

/// Semantic element kinds that carry an inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    H1,
    H2,
    H3,
    Paragraph,
    Blockquote,
    UnorderedList,
    OrderedList,
    Rule,
    Image,
    Link,
    InlineCode,
    Pre,
    Table,
    HeaderCell,
    DataCell,
}

impl StyleKey {
    pub const ALL: [StyleKey; 15] = [
        Self::H1,
        Self::H2,
        Self::H3,
        Self::Paragraph,
        Self::Blockquote,
        Self::UnorderedList,
        Self::OrderedList,
        Self::Rule,
        Self::Image,
        Self::Link,
        Self::InlineCode,
        Self::Pre,
        Self::Table,
        Self::HeaderCell,
        Self::DataCell,
    ];

    /// Returns the CSS declaration string for this element kind.
    pub const fn declaration(self) -> &'static str {
        match self {
            Self::H1 => "font-size:24px;font-weight:700;margin:18px 0;color:#1f2328;",
            Self::H2 => "font-size:22px;font-weight:700;margin:16px 0;color:#1f2328;",
            Self::H3 => "font-size:20px;font-weight:700;margin:14px 0;color:#1f2328;",
            Self::Paragraph => "font-size:16px;line-height:1.8;margin:12px 0;color:#1f2328;",
            Self::Blockquote => {
                "border-left:3px solid #d9d9d9;padding:8px 12px;margin:12px 0;color:#666;background:#fafafa;"
            }
            Self::UnorderedList | Self::OrderedList => "margin:12px 0;padding-left:1.25em;",
            Self::Rule => "border:none;border-top:1px solid #e5e5e5;margin:24px 0;",
            Self::Image => "max-width:100%;display:block;margin:12px auto;",
            Self::Link => "color:#1677ff;text-decoration:none;border-bottom:1px dotted #1677ff;",
            Self::InlineCode => {
                "background:#f6f8fa;padding:2px 4px;border-radius:4px;font-family:Consolas,Menlo,monospace;font-size:14px;"
            }
            Self::Pre => "background:#f6f8fa;padding:12px;border-radius:8px;overflow:auto;margin:12px 0;",
            Self::Table => "border-collapse:collapse;width:100%;margin:12px 0;",
            Self::HeaderCell => {
                "border:1px solid #e5e5e5;padding:8px;background:#fafafa;text-align:left;"
            }
            Self::DataCell => "border:1px solid #e5e5e5;padding:8px;text-align:left;",
        }
    }

    /// The key name as used by the HTML tag it styles (`code_inline` for inline code).
    pub const fn tag(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::Paragraph => "p",
            Self::Blockquote => "blockquote",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::Rule => "hr",
            Self::Image => "img",
            Self::Link => "a",
            Self::InlineCode => "code_inline",
            Self::Pre => "pre",
            Self::Table => "table",
            Self::HeaderCell => "th",
            Self::DataCell => "td",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.tag() == tag)
    }

    /// Only the first three heading levels are styled.
    pub const fn heading(level: HeadingLevel) -> Option<Self> {
        match level {
            HeadingLevel::H1 => Some(Self::H1),
            HeadingLevel::H2 => Some(Self::H2),
            HeadingLevel::H3 => Some(Self::H3),
            _ => None,
        }
    }
}

/// Looks up the declaration for a tag name, empty when the tag is not styled.
pub fn style_for(tag: &str) -> &'static str {
    StyleKey::from_tag(tag)
        .map(StyleKey::declaration)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_declaration() {
        for key in StyleKey::ALL {
            assert!(!key.declaration().is_empty(), "{key:?} has no declaration");
            assert!(key.declaration().ends_with(';'));
            assert_eq!(StyleKey::from_tag(key.tag()), Some(key));
        }
    }

    #[test]
    fn test_unknown_tags_are_unstyled() {
        assert_eq!(style_for("h4"), "");
        assert_eq!(style_for("tr"), "");
        assert_eq!(style_for("span"), "");
        assert_eq!(style_for("p"), StyleKey::Paragraph.declaration());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(StyleKey::heading(HeadingLevel::H2), Some(StyleKey::H2));
        assert_eq!(StyleKey::heading(HeadingLevel::H4), None);
        assert_eq!(StyleKey::heading(HeadingLevel::H6), None);
    }
}
