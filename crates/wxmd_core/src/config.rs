//! Renderer configuration.
//!
//! Parser options are fixed, only highlighting and the heading id policy are
//! configurable. A config is read once when the renderer is built.
//!
//! ```toml
//! heading-ids = "numbered"
//!
//! [highlight]
//! theme = "InspiredGitHub"
//! mode = "inline"
//! ```

use crate::error::Error;
use crate::slug::HeadingIdPolicy;
use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

/// Markdown extensions enabled on every parse.
///
/// Raw HTML passes through and soft breaks stay soft, both are pulldown-cmark
/// defaults. Autolinking and the remaining typographic replacements are done
/// by [`crate::parse`] after parsing.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RenderConfig {
    /// How headings with identical text are assigned ids.
    pub heading_ids: HeadingIdPolicy,

    /// Code block highlighting.
    pub highlight: HighlightConfig,
}

impl RenderConfig {
    /// Parses a config from TOML, missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }
}

/// How highlighted tokens are marked up.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightMode {
    /// `<span style="color:…">`, survives class stripping.
    #[default]
    Inline,
    /// `<span class="…">`, needs a stylesheet on the consuming page.
    Classed,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Whether to highlight code blocks at all.
    pub enable: bool,

    /// Name of a syntect default theme, used by the inline mode.
    pub theme: String,

    pub mode: HighlightMode,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: crate::highlight::DEFAULT_THEME.into(),
            mode: HighlightMode::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(RenderConfig::from_toml_str("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let config = RenderConfig::from_toml_str(
            r#"
heading-ids = "numbered"

[highlight]
theme = "Solarized (light)"
mode = "classed"
"#,
        )
        .unwrap();

        assert_eq!(config.heading_ids, HeadingIdPolicy::Numbered);
        assert!(config.highlight.enable);
        assert_eq!(config.highlight.theme, "Solarized (light)");
        assert_eq!(config.highlight.mode, HighlightMode::Classed);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = RenderConfig::from_toml_str("line-breaks = true").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parser_options() {
        let options = parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));
        assert!(!options.contains(Options::ENABLE_HEADING_ATTRIBUTES));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }
}
