//! Builders for storage format macros, links and images.

use std::fmt::Write;

use cw_renderer::{cdata, escape};

/// Anchor macro that [`anchor_link`] can point at.
pub(crate) fn anchor(name: &str) -> String {
    format!(
        r#"<ac:structured-macro ac:name="anchor" ac:schema-version="1"><ac:parameter ac:name="">{}</ac:parameter></ac:structured-macro>"#,
        escape(name)
    )
}

/// Link to an anchor in the current page. `body` is rendered markup.
pub(crate) fn anchor_link(name: &str, body: &str) -> String {
    format!(
        r#"<ac:link ac:anchor="{}"><ac:link-body>{body}</ac:link-body></ac:link>"#,
        escape(name)
    )
}

/// Link to a page by space key and title. An empty `body` lets the page title show.
pub(crate) fn page_link(space: &str, title: &str, body: &str) -> String {
    let mut out = format!(
        r#"<ac:link><ri:page ri:space-key="{}" ri:content-title="{}" />"#,
        escape(space),
        escape(title)
    );
    if !body.is_empty() {
        write!(out, "<ac:link-body>{body}</ac:link-body>").unwrap();
    }
    out.push_str("</ac:link>");
    out
}

/// Macro with named parameters and a rich text body.
///
/// Parameters with empty values are skipped.
pub(crate) fn rich_macro<'a>(
    name: &str,
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
    body: &str,
) -> String {
    let mut out = format!(r#"<ac:structured-macro ac:name="{name}" ac:schema-version="1">"#);
    for (key, value) in params {
        if value.is_empty() {
            continue;
        }
        write!(
            out,
            r#"<ac:parameter ac:name="{}">{}</ac:parameter>"#,
            escape(key),
            escape(value)
        )
        .unwrap();
    }
    write!(
        out,
        "<ac:rich-text-body>{body}</ac:rich-text-body></ac:structured-macro>"
    )
    .unwrap();
    out
}

/// Macro whose body is literal text.
pub(crate) fn plain_macro(name: &str, text: &str) -> String {
    format!(
        r#"<ac:structured-macro ac:name="{name}" ac:schema-version="1"><ac:plain-text-body>{}</ac:plain-text-body></ac:structured-macro>"#,
        cdata(text)
    )
}

/// Image reference.
///
/// Remote and `data:` sources become `ri:url`; anything else is assumed to be
/// uploaded as an attachment and referenced by file name.
pub(crate) fn image(src: &str, title: &str) -> String {
    let is_url = src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:");
    let inner = if is_url {
        format!(r#"ri:url ri:value="{}""#, escape(src))
    } else {
        let filename = src.rsplit('/').next().unwrap_or(src);
        format!(r#"ri:attachment ri:filename="{}""#, escape(filename))
    };
    let title = cw_renderer::attributes([("ac:title", title)]);
    format!("<ac:image{title}><{inner} /></ac:image>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_anchor() {
        assert_eq!(
            anchor("fn1"),
            r#"<ac:structured-macro ac:name="anchor" ac:schema-version="1"><ac:parameter ac:name="">fn1</ac:parameter></ac:structured-macro>"#
        );
    }

    #[test]
    fn test_anchor_link() {
        assert_eq!(
            anchor_link("sec1", "x"),
            r#"<ac:link ac:anchor="sec1"><ac:link-body>x</ac:link-body></ac:link>"#
        );
    }

    #[test]
    fn test_page_link_without_body() {
        assert_eq!(
            page_link("DOCS", "Home Page", ""),
            r#"<ac:link><ri:page ri:space-key="DOCS" ri:content-title="Home Page" /></ac:link>"#
        );
    }

    #[test]
    fn test_rich_macro_skips_empty_params() {
        assert_eq!(
            rich_macro("div", [("class", "note"), ("id", "")], "<p>x</p>"),
            r#"<ac:structured-macro ac:name="div" ac:schema-version="1"><ac:parameter ac:name="class">note</ac:parameter><ac:rich-text-body><p>x</p></ac:rich-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn test_plain_macro() {
        assert_eq!(
            plain_macro("html", "<b>hi</b>"),
            r#"<ac:structured-macro ac:name="html" ac:schema-version="1"><ac:plain-text-body><![CDATA[<b>hi</b>]]></ac:plain-text-body></ac:structured-macro>"#
        );
    }

    #[test]
    fn test_external_image() {
        assert_eq!(
            image("https://example.com/image.png", "Logo"),
            r#"<ac:image ac:title="Logo"><ri:url ri:value="https://example.com/image.png" /></ac:image>"#
        );
    }

    #[test]
    fn test_local_image() {
        assert_eq!(
            image("./images/diagram.png", ""),
            r#"<ac:image><ri:attachment ri:filename="diagram.png" /></ac:image>"#
        );
    }

    #[test]
    fn test_data_uri_image() {
        assert_eq!(
            image("data:image/png;base64,iVBO", ""),
            r#"<ac:image><ri:url ri:value="data:image/png;base64,iVBO" /></ac:image>"#
        );
    }
}
