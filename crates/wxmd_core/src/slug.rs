//! Heading slugs and anchor ids.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix of every generated heading id.
pub const HEADING_ID_PREFIX: &str = "h-";

/// Converts heading text to an anchor-friendly slug.
///
/// The text is trimmed, lowercased and every run of whitespace becomes a single
/// hyphen. Punctuation and non-Latin scripts are kept as they are, documents
/// for the target platform are mostly written in CJK.
///
/// # Example
///
/// ```
/// use wxmd_core::slug::slug;
///
/// assert_eq!(slug("Hello World"), "hello-world");
/// assert_eq!(slug("  A   B  "), "a-b");
/// assert_eq!(slug("标题示例"), "标题示例");
/// ```
pub fn slug(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Returns the anchor id of a heading with the given plain text.
pub fn heading_id(text: &str) -> String {
    format!("{HEADING_ID_PREFIX}{}", slug(text))
}

/// How identical heading texts are mapped to ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingIdPolicy {
    /// Identical texts share one id, anchors resolve to the first occurrence.
    #[default]
    Shared,
    /// Repeated ids get a `-1`, `-2`, ... suffix in document order.
    Numbered,
}

/// Hands out heading ids in document order for a single pass.
///
/// Rendering and heading extraction each build their own instance, so the ids
/// they produce for the same input are identical.
#[derive(Debug, Default)]
pub struct HeadingIds {
    policy: HeadingIdPolicy,
    counts: HashMap<String, usize>,
}

impl HeadingIds {
    pub fn new(policy: HeadingIdPolicy) -> Self {
        Self {
            policy,
            counts: HashMap::new(),
        }
    }

    /// Returns the id of the next heading with the given plain text.
    pub fn next_id(&mut self, text: &str) -> String {
        let id = heading_id(text);
        match self.policy {
            HeadingIdPolicy::Shared => id,
            HeadingIdPolicy::Numbered => {
                let seen = self.counts.entry(id.clone()).or_insert(0);
                let numbered = if *seen == 0 {
                    id
                } else {
                    format!("{id}-{seen}")
                };
                *seen += 1;
                numbered
            }
        }
    }
}
