//! Typographic replacements beyond pulldown-cmark's smart punctuation.
//!
//! Quotes, dashes and `...` are already handled by the parser.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static SCOPED_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((c|tm|r)\)").expect("abbreviation pattern is valid"));

static RARE_REPLACEMENTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\+-", "±"),
        // `?...` was already turned into `?…` by the parser.
        (r"([?!])…", "$1.."),
        (r"([?!]){4,}", "$1$1$1"),
        (r",{2,}", ","),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("replacement pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Applies `(c)` → `©`, `(tm)` → `™`, `(r)` → `®`, `+-` → `±` and squashes
/// runs of `?`, `!` and `,`.
///
/// Returns the input unchanged when nothing applies.
///
/// ```
/// use wxmd_core::parse::replace_typography;
///
/// assert_eq!(replace_typography("(c) 2024 +-1"), "© 2024 ±1");
/// assert_eq!(replace_typography("plain"), "plain");
/// ```
pub fn replace_typography(text: &str) -> Cow<'_, str> {
    if !text.contains(['(', '+', '?', '!', ',']) {
        return Cow::Borrowed(text);
    }

    let mut out = Cow::Borrowed(text);

    let abbreviated = replace_owned(&SCOPED_ABBREVIATION, &out, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "c" => "©",
            "r" => "®",
            _ => "™",
        }
    });
    if let Some(replaced) = abbreviated {
        out = Cow::Owned(replaced);
    }

    for (regex, replacement) in RARE_REPLACEMENTS.iter() {
        if let Some(replaced) = replace_owned(regex, &out, *replacement) {
            out = Cow::Owned(replaced);
        }
    }

    out
}

/// Runs `replace_all`, returning `None` when nothing matched.
fn replace_owned<R: regex::Replacer>(regex: &Regex, text: &str, replacer: R) -> Option<String> {
    match regex.replace_all(text, replacer) {
        Cow::Owned(replaced) => Some(replaced),
        Cow::Borrowed(_) => None,
    }
}
