//! Link target classification.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::warn;

/// Scheme prefix of internal page references.
const PAGE_SCHEME: &str = "confluence:";

/// `confluence:SPACE:Title with spaces`, after percent-decoding.
static PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^confluence:(\w+):([\w ]+)$").unwrap());

/// Where a link points.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LinkTarget<'a> {
    /// Page in a space, addressed by title.
    Page { space: String, title: String },
    /// Anchor in the current document (without the leading `#`).
    Anchor(&'a str),
    /// Anything else, used verbatim.
    External(&'a str),
}

/// Classify a raw link target.
///
/// A `confluence:` target that does not match `SPACE:Title` falls back to
/// [`LinkTarget::External`] so the link is never lost.
pub(crate) fn classify(target: &str) -> LinkTarget<'_> {
    if target.starts_with(PAGE_SCHEME) {
        let decoded: Cow<'_, str> = percent_decode_str(target).decode_utf8_lossy();
        if let Some(caps) = PAGE_RE.captures(&decoded) {
            return LinkTarget::Page {
                space: caps[1].to_owned(),
                title: caps[2].to_owned(),
            };
        }
        warn!(link = target, "malformed page reference, rendering as external link");
        return LinkTarget::External(target);
    }

    match target.strip_prefix('#') {
        Some(anchor) => LinkTarget::Anchor(anchor),
        None => LinkTarget::External(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_reference() {
        assert_eq!(
            classify("confluence:DOCS:Home Page"),
            LinkTarget::Page {
                space: "DOCS".to_owned(),
                title: "Home Page".to_owned(),
            }
        );
    }

    #[test]
    fn test_page_reference_percent_encoded() {
        assert_eq!(
            classify("confluence:DOCS:Release%20Notes%202024"),
            LinkTarget::Page {
                space: "DOCS".to_owned(),
                title: "Release Notes 2024".to_owned(),
            }
        );
    }

    #[test]
    fn test_malformed_page_reference_is_external() {
        assert_eq!(
            classify("confluence:DOCS"),
            LinkTarget::External("confluence:DOCS")
        );
        assert_eq!(
            classify("confluence:DOCS:What's new?"),
            LinkTarget::External("confluence:DOCS:What's new?")
        );
    }

    #[test]
    fn test_anchor() {
        assert_eq!(classify("#sec1"), LinkTarget::Anchor("sec1"));
    }

    #[test]
    fn test_external() {
        assert_eq!(
            classify("https://example.com/a?b=c"),
            LinkTarget::External("https://example.com/a?b=c")
        );
        assert_eq!(classify("page.html#top"), LinkTarget::External("page.html#top"));
    }
}
