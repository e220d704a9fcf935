//! Syntax highlighting for code blocks, backed by syntect.

use crate::config::{HighlightConfig, HighlightMode};
use crate::error::Error;
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{
    styled_line_to_highlighted_html, ClassStyle, ClassedHTMLGenerator, IncludeBackground,
};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Light theme matching the `#f6f8fa` code block background.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Returns the names of all bundled themes.
pub fn theme_names() -> Vec<String> {
    THEME_SET.themes.keys().cloned().collect()
}

/// Escapes code for display inside `<code>`.
pub fn escape_code(code: &str) -> String {
    html_escape::encode_text(code).into_owned()
}

/// Highlights code blocks into HTML fragments.
///
/// Built once per renderer, highlighting never fails: anything that goes wrong
/// ends up as escaped plain text.
#[derive(Debug, Clone)]
pub struct CodeHighlighter {
    enable: bool,
    mode: HighlightMode,
    theme: Theme,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self {
            enable: true,
            mode: HighlightMode::Inline,
            theme: THEME_SET
                .themes
                .get(DEFAULT_THEME)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl CodeHighlighter {
    pub fn new(config: &HighlightConfig) -> Result<Self, Error> {
        let theme = THEME_SET
            .themes
            .get(&config.theme)
            .cloned()
            .ok_or_else(|| Error::UnknownTheme(config.theme.clone()))?;

        Ok(Self {
            enable: config.enable,
            mode: config.mode,
            theme,
        })
    }

    /// Picks a syntax for the block.
    ///
    /// A recognized language token wins, otherwise the first line is inspected
    /// (shebangs, `<?php`, `<?xml`, editor modelines).
    pub fn resolve_syntax(
        &self,
        lang: Option<&str>,
        code: &str,
    ) -> Option<&'static SyntaxReference> {
        let syntax_set: &'static SyntaxSet = &SYNTAX_SET;

        if let Some(syntax) = lang.and_then(|token| syntax_set.find_syntax_by_token(token)) {
            return Some(syntax);
        }

        let first_line = code.lines().next().unwrap_or_default();
        let detected = syntax_set.find_syntax_by_first_line(first_line);
        tracing::trace!(
            ?lang,
            detected = ?detected.map(|syntax| &syntax.name),
            "Falling back to first-line detection"
        );
        detected
    }

    /// Returns the highlighted HTML for the content of a code block.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        if !self.enable {
            return escape_code(code);
        }

        let Some(syntax) = self.resolve_syntax(lang, code) else {
            return escape_code(code);
        };

        let highlighted = match self.mode {
            HighlightMode::Inline => self.highlight_inline(code, syntax),
            HighlightMode::Classed => highlight_classed(code, syntax),
        };

        highlighted.unwrap_or_else(|err| {
            tracing::warn!(?err, syntax = %syntax.name, "Failed to highlight code block");
            escape_code(code)
        })
    }

    fn highlight_inline(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut html = String::with_capacity(code.len() * 4);

        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &SYNTAX_SET)?;
            html.push_str(&styled_line_to_highlighted_html(
                &ranges[..],
                IncludeBackground::No,
            )?);
        }

        Ok(html)
    }
}

fn highlight_classed(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_bundled() {
        assert!(theme_names().iter().any(|name| name == DEFAULT_THEME));
        assert!(CodeHighlighter::new(&HighlightConfig::default()).is_ok());
    }

    #[test]
    fn test_unknown_theme() {
        let config = HighlightConfig {
            theme: "No Such Theme".into(),
            ..Default::default()
        };
        assert!(matches!(
            CodeHighlighter::new(&config),
            Err(Error::UnknownTheme(name)) if name == "No Such Theme"
        ));
    }

    #[test]
    fn test_resolve_syntax() {
        let highlighter = CodeHighlighter::default();
        let rust = highlighter.resolve_syntax(Some("rust"), "fn main() {}").unwrap();
        assert_eq!(rust.name, "Rust");
        let by_ext = highlighter.resolve_syntax(Some("rs"), "fn main() {}").unwrap();
        assert_eq!(by_ext.name, "Rust");

        let shell = highlighter
            .resolve_syntax(Some("unknownlang"), "#!/bin/bash\necho hi\n")
            .unwrap();
        assert_eq!(shell.name, "Bourne Again Shell (bash)");

        assert!(highlighter
            .resolve_syntax(Some("unknownlang"), "just words")
            .is_none());
    }

    #[test]
    fn test_inline_highlight_uses_style_attributes() {
        let highlighter = CodeHighlighter::default();
        let html = highlighter.highlight("let x = 1;\n", Some("rust"));
        assert!(html.contains("<span style=\""));
        assert!(!html.contains("class="));
        assert!(html.contains("let"));
    }

    #[test]
    fn test_classed_highlight() {
        let highlighter = CodeHighlighter::new(&HighlightConfig {
            mode: HighlightMode::Classed,
            ..Default::default()
        })
        .unwrap();
        let html = highlighter.highlight("let x = 1;\n", Some("rust"));
        assert!(html.contains("<span class=\""));
    }

    #[test]
    fn test_unrecognized_code_is_escaped() {
        let highlighter = CodeHighlighter::default();
        assert_eq!(
            highlighter.highlight("a < b && c > d", Some("unknownlang")),
            "a &lt; b &amp;&amp; c &gt; d"
        );
    }

    #[test]
    fn test_disabled_highlighting() {
        let highlighter = CodeHighlighter::new(&HighlightConfig {
            enable: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(highlighter.highlight("<b>", Some("html")), "&lt;b&gt;");
    }

    #[test]
    fn test_highlighted_code_is_escaped() {
        let highlighter = CodeHighlighter::default();
        let html = highlighter.highlight("<div>&</div>\n", Some("html"));
        assert!(html.contains("&lt;"));
        assert!(!html.contains("<div>"));
    }
}
