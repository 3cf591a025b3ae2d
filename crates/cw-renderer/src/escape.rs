//! Escaping for element content, attribute values and CDATA sections.

/// Escape XML/HTML special characters.
///
/// Single pass over the input: `&`, `<`, `>`, `"` and `'` become character
/// references and nothing produced here is examined again. The same set is
/// valid in element content and in double-quoted attribute values, so one
/// function serves both contexts.
///
/// Apply to raw source text only, never to markup returned by another handler.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Wrap text in a CDATA section.
///
/// A literal `]]>` in the text is split across two sections.
#[must_use]
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}
