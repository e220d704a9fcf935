//! Detection of bare links in prose text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

// ASCII only: a CJK comma or full stop right after a URL ends it.
static LINK_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:https?|ftp)://|www\.)[a-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+|[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}",
    )
    .expect("link pattern is valid")
});

/// Kind of a bare link found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `https://…`, `http://…` or `ftp://…`.
    Url,
    /// `www.…` without a scheme.
    Www,
    Email,
}

/// A bare link inside a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte range of the link in the searched text.
    pub range: Range<usize>,
    pub kind: LinkKind,
}

impl LinkMatch {
    /// Link destination, `www.` hosts get an `http://` scheme.
    ///
    /// E-mail addresses are returned as is, the `mailto:` scheme is added when
    /// the link is rendered.
    pub fn destination(&self, text: &str) -> String {
        let link = &text[self.range.clone()];
        match self.kind {
            LinkKind::Www => format!("http://{link}"),
            LinkKind::Url | LinkKind::Email => link.to_string(),
        }
    }
}

/// Finds the bare URLs, `www.` hosts and e-mail addresses in `text`.
///
/// # Example
///
/// ```
/// use wxmd_core::parse::{find_links, LinkKind};
///
/// let text = "访问 https://mp.weixin.qq.com。";
/// let links = find_links(text);
/// assert_eq!(links.len(), 1);
/// assert_eq!(&text[links[0].range.clone()], "https://mp.weixin.qq.com");
/// assert_eq!(links[0].kind, LinkKind::Url);
/// ```
pub fn find_links(text: &str) -> Vec<LinkMatch> {
    LINK_CANDIDATE
        .find_iter(text)
        .filter(|candidate| {
            text[..candidate.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '@' && c != '.')
        })
        .filter_map(|candidate| {
            let link = trim_trailing_punctuation(candidate.as_str());
            let kind = classify(link)?;
            Some(LinkMatch {
                range: candidate.start()..candidate.start() + link.len(),
                kind,
            })
        })
        .collect()
}

fn classify(link: &str) -> Option<LinkKind> {
    let lower = link.to_ascii_lowercase();
    if let Some(scheme_end) = lower.find("://") {
        let rest = &lower[scheme_end + 3..];
        let has_host = rest.chars().next().map_or(false, |c| c.is_ascii_alphanumeric());
        has_host.then_some(LinkKind::Url)
    } else if let Some(host) = lower.strip_prefix("www.") {
        host.contains(|c: char| c.is_ascii_alphanumeric())
            .then_some(LinkKind::Www)
    } else if link.contains('@') {
        Some(LinkKind::Email)
    } else {
        None
    }
}

/// Drops sentence punctuation and unbalanced closing brackets at the end.
fn trim_trailing_punctuation(mut link: &str) -> &str {
    loop {
        let Some(last) = link.chars().next_back() else {
            return link;
        };
        let trim = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '*' | '~' => true,
            ')' => link.matches('(').count() < link.matches(')').count(),
            ']' => link.matches('[').count() < link.matches(']').count(),
            _ => false,
        };
        if !trim {
            return link;
        }
        link = &link[..link.len() - last.len_utf8()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(text: &str) -> Vec<(&str, LinkKind)> {
        find_links(text)
            .into_iter()
            .map(|m| (&text[m.range.clone()], m.kind))
            .collect()
    }

    #[test]
    fn test_find_links() {
        assert_eq!(
            links("see https://example.com/a?b=1&c=2 and www.rust-lang.org."),
            vec![
                ("https://example.com/a?b=1&c=2", LinkKind::Url),
                ("www.rust-lang.org", LinkKind::Www),
            ]
        );
        assert_eq!(
            links("mail me: someone@example.com!"),
            vec![("someone@example.com", LinkKind::Email)]
        );
    }

    #[test]
    fn test_cjk_neighbours() {
        assert_eq!(
            links("链接：https://mp.weixin.qq.com，欢迎"),
            vec![("https://mp.weixin.qq.com", LinkKind::Url)]
        );
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            links("(see https://en.wikipedia.org/wiki/Rust_(programming_language))"),
            vec![(
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                LinkKind::Url
            )]
        );
    }

    #[test]
    fn test_not_links() {
        assert!(links("https:// is a scheme").is_empty());
        assert!(links("the www. prefix").is_empty());
        assert!(links("abchttps://example.com").is_empty());
        assert!(links("version 1.2.3").is_empty());
    }

    #[test]
    fn test_destination() {
        let text = "www.example.com";
        let link = &find_links(text)[0];
        assert_eq!(link.destination(text), "http://www.example.com");
    }
}
