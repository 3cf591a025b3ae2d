//! Attribute serialization.

use std::fmt::Write;

use tracing::debug;

use crate::escape::escape;

/// Serialize key/value pairs as ` key="value"` fragments.
///
/// Entries with an empty value are omitted entirely. Values are escaped.
/// Keys that are not valid XML attribute names are dropped.
///
/// # Example
///
/// ```
/// use cw_renderer::attributes;
///
/// assert_eq!(attributes([("id", "a"), ("title", "")]), r#" id="a""#);
/// ```
pub fn attributes<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        if !is_name(key) {
            debug!(key, "dropping attribute with invalid name");
            continue;
        }
        write!(out, r#" {key}="{}""#, escape(value)).unwrap();
    }
    out
}

/// Whether `key` is usable as an XML attribute name.
fn is_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
