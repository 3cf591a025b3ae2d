//! Storage format handler table.

use std::collections::BTreeMap;
use std::fmt::Write;

use cw_ast::{Alignment, Attributes, Citation};
use cw_diagrams::DiagramPipeline;
use cw_renderer::{
    Footnotes, HandlerError, HandlerResult, RenderContext, Writer, alignment_name, attributes,
    escape, has_header, row_parity,
};
use tracing::debug;

use crate::links::{LinkTarget, classify};
use crate::macros::{anchor, anchor_link, image, page_link, plain_macro, rich_macro};

/// Raw format passed through (inside the `html` macro).
const RAW_FORMAT: &str = "html";

/// Default stylesheet: zebra striped tables and small footnotes.
pub const DEFAULT_STYLESHEET: &str = "\
table tr.odd td { background-color: #ffffff; }
table tr.even td { background-color: #f4f5f7; }
ol.footnotes { font-size: smaller; }
";

/// Confluence storage format writer.
///
/// Produces XHTML storage markup with:
/// - `ac:link` + `ri:page` for `confluence:SPACE:Title` links, `ac:anchor` for `#id`
/// - `ac:image` with `ri:url` or `ri:attachment` for images
/// - the `anchor` macro for header ids and footnote targets
/// - the `div` macro for divs and figures
/// - a one-time `style` macro carrying the stylesheet
pub struct StorageWriter {
    diagrams: DiagramPipeline,
    stylesheet: String,
}

impl StorageWriter {
    /// Create a writer with default diagram commands and stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagrams: DiagramPipeline::new(),
            stylesheet: DEFAULT_STYLESHEET.to_owned(),
        }
    }

    /// Use `pipeline` for diagram code blocks.
    #[must_use]
    pub fn with_diagrams(mut self, pipeline: DiagramPipeline) -> Self {
        self.diagrams = pipeline;
        self
    }

    /// Replace the embedded stylesheet. An empty string disables it.
    #[must_use]
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = css.into();
        self
    }
}

impl Default for StorageWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn raw(format: &str, text: &str) -> String {
    if format == RAW_FORMAT {
        plain_macro("html", text)
    } else {
        debug!(format, "discarding raw content for another format");
        String::new()
    }
}

fn footnote_id(n: usize) -> String {
    format!("fn{n}")
}

fn footnote_ref_id(n: usize) -> String {
    format!("fnref{n}")
}

/// Attributes other than `id`.
fn without_id(attr: &Attributes) -> impl Iterator<Item = (&str, &str)> {
    attr.iter().filter(|&(key, _)| key != "id")
}

fn cell_style(aligns: &[Alignment], column: usize) -> String {
    let align = aligns.get(column).copied().unwrap_or_default();
    format!(r#" style="text-align:{}""#, alignment_name(align))
}

impl Writer for StorageWriter {
    fn blocksep(&self) -> &str {
        "\n"
    }

    fn str(&self, text: &str) -> String {
        escape(text)
    }

    fn space(&self) -> String {
        " ".to_owned()
    }

    fn soft_break(&self) -> String {
        " ".to_owned()
    }

    fn line_break(&self) -> String {
        "<br />".to_owned()
    }

    fn emph(&self, content: &str) -> String {
        format!("<em>{content}</em>")
    }

    fn strong(&self, content: &str) -> String {
        format!("<strong>{content}</strong>")
    }

    fn subscript(&self, content: &str) -> HandlerResult {
        Ok(format!("<sub>{content}</sub>"))
    }

    fn superscript(&self, content: &str) -> HandlerResult {
        Ok(format!("<sup>{content}</sup>"))
    }

    fn small_caps(&self, content: &str) -> HandlerResult {
        Ok(format!(
            r#"<span style="font-variant: small-caps;">{content}</span>"#
        ))
    }

    fn strikeout(&self, content: &str) -> HandlerResult {
        Ok(format!("<s>{content}</s>"))
    }

    fn link(&self, content: &str, target: &str, title: &str, attr: &Attributes) -> String {
        match classify(target) {
            LinkTarget::Page { space, title } => page_link(&space, &title, content),
            LinkTarget::Anchor(name) => anchor_link(name, content),
            LinkTarget::External(href) => {
                let extra = attr
                    .iter()
                    .filter(|&(key, _)| key != "href" && key != "title");
                let attrs =
                    attributes([("href", href), ("title", title)].into_iter().chain(extra));
                format!("<a{attrs}>{content}</a>")
            }
        }
    }

    fn image(&self, _alt: &str, src: &str, title: &str, _attr: &Attributes) -> String {
        image(src, title)
    }

    fn captioned_image(
        &self,
        _cx: &mut RenderContext,
        src: &str,
        title: &str,
        caption: &str,
        attr: &Attributes,
    ) -> HandlerResult {
        let mut body = String::new();
        if let Some(id) = attr.id() {
            body.push_str(&anchor(id));
        }
        write!(body, "<p>{}</p>", image(src, title)).unwrap();
        let caption = if caption.is_empty() {
            escape(title)
        } else {
            caption.to_owned()
        };
        if !caption.is_empty() {
            write!(body, "<p><em>{caption}</em></p>").unwrap();
        }
        Ok(rich_macro("div", [("class", "figure")], &body))
    }

    fn code(&self, text: &str, attr: &Attributes) -> String {
        format!("<code{}>{}</code>", attributes(attr.iter()), escape(text))
    }

    fn inline_math(&self, text: &str) -> HandlerResult {
        Ok(format!(r#"<code class="math inline">{}</code>"#, escape(text)))
    }

    fn display_math(&self, text: &str) -> HandlerResult {
        Ok(format!(r#"<code class="math display">{}</code>"#, escape(text)))
    }

    fn note(&self, cx: &mut RenderContext, body: &str) -> String {
        let n = cx.footnotes_mut().add_with(|n| {
            format!(
                "<li>{}{body} {}</li>",
                anchor(&footnote_id(n)),
                anchor_link(&footnote_ref_id(n), "\u{21a9}")
            )
        });
        format!(
            "<sup>{}{}</sup>",
            anchor(&footnote_ref_id(n)),
            anchor_link(&footnote_id(n), &n.to_string())
        )
    }

    fn span(&self, content: &str, attr: &Attributes) -> HandlerResult {
        Ok(format!("<span{}>{content}</span>", attributes(attr.iter())))
    }

    fn raw_inline(&self, format: &str, text: &str) -> HandlerResult {
        Ok(raw(format, text))
    }

    fn cite(&self, content: &str, citations: &[Citation]) -> HandlerResult {
        let ids: Vec<&str> = citations.iter().map(|c| c.id.as_str()).collect();
        let attrs = attributes([("class", "citation"), ("data-cites", ids.join(",").as_str())]);
        Ok(format!("<span{attrs}>{content}</span>"))
    }

    fn double_quoted(&self, content: &str) -> String {
        format!("\u{201c}{content}\u{201d}")
    }

    fn single_quoted(&self, content: &str) -> String {
        format!("\u{2018}{content}\u{2019}")
    }

    fn plain(&self, content: &str) -> String {
        content.to_owned()
    }

    fn para(&self, content: &str) -> String {
        format!("<p>{content}</p>")
    }

    fn header(&self, level: u8, content: &str, attr: &Attributes) -> String {
        let level = level.clamp(1, 6);
        let mut out = String::new();
        if let Some(id) = attr.id() {
            out.push_str(&anchor(id));
        }
        write!(
            out,
            "<h{level}{}>{content}</h{level}>",
            attributes(without_id(attr))
        )
        .unwrap();
        out
    }

    fn block_quote(&self, content: &str) -> String {
        format!("<blockquote>{content}</blockquote>")
    }

    fn horizontal_rule(&self) -> String {
        "<hr />".to_owned()
    }

    fn line_block(&self, lines: &[String]) -> HandlerResult {
        Ok(format!(
            r#"<p style="white-space: pre-wrap;">{}</p>"#,
            lines.join("<br />")
        ))
    }

    fn code_block(&self, text: &str, attr: &Attributes) -> HandlerResult {
        if self.diagrams.matches(attr) {
            let uri = self
                .diagrams
                .render(text)
                .map_err(|source| HandlerError::Diagram {
                    content: text.to_owned(),
                    source,
                })?;
            return Ok(format!("<p>{}</p>", image(&uri, "")));
        }
        Ok(format!(
            "<pre><code{}>{}</code></pre>",
            attributes(attr.iter()),
            escape(text)
        ))
    }

    fn bullet_list(&self, items: &[String]) -> String {
        let mut out = String::from("<ul>");
        for item in items {
            write!(out, "<li>{item}</li>").unwrap();
        }
        out.push_str("</ul>");
        out
    }

    fn ordered_list(&self, start: u32, items: &[String]) -> String {
        let mut out = match start {
            1 => String::from("<ol>"),
            n => format!(r#"<ol start="{n}">"#),
        };
        for item in items {
            write!(out, "<li>{item}</li>").unwrap();
        }
        out.push_str("</ol>");
        out
    }

    fn definition_list(&self, items: &[(String, Vec<String>)]) -> HandlerResult {
        let mut out = String::from("<dl>");
        for (term, definitions) in items {
            write!(out, "<dt>{term}</dt>").unwrap();
            for definition in definitions {
                write!(out, "<dd>{definition}</dd>").unwrap();
            }
        }
        out.push_str("</dl>");
        Ok(out)
    }

    fn table(
        &self,
        caption: &str,
        aligns: &[Alignment],
        headers: &[String],
        rows: &[Vec<String>],
    ) -> String {
        let mut out = String::new();
        if !caption.is_empty() {
            write!(out, "<p><strong>{caption}</strong></p>").unwrap();
        }
        out.push_str("<table>");
        if has_header(headers) {
            out.push_str("<thead><tr>");
            for (column, cell) in headers.iter().enumerate() {
                write!(out, "<th{}>{cell}</th>", cell_style(aligns, column)).unwrap();
            }
            out.push_str("</tr></thead>");
        }
        out.push_str("<tbody>");
        for (index, row) in rows.iter().enumerate() {
            write!(out, r#"<tr class="{}">"#, row_parity(index)).unwrap();
            for (column, cell) in row.iter().enumerate() {
                write!(out, "<td{}>{cell}</td>", cell_style(aligns, column)).unwrap();
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
        out
    }

    fn raw_block(&self, format: &str, text: &str) -> HandlerResult {
        Ok(raw(format, text))
    }

    fn div(&self, content: &str, attr: &Attributes) -> HandlerResult {
        Ok(rich_macro("div", attr.iter(), content))
    }

    fn doc(
        &self,
        body: &str,
        _meta: &BTreeMap<String, String>,
        _variables: &BTreeMap<String, String>,
        footnotes: &Footnotes,
    ) -> String {
        let mut parts = Vec::with_capacity(3);
        if !self.stylesheet.is_empty() {
            parts.push(plain_macro("style", &self.stylesheet));
        }
        if !body.is_empty() {
            parts.push(body.to_owned());
        }
        if !footnotes.is_empty() {
            parts.push(format!(
                r#"<hr /><ol class="footnotes">{}</ol>"#,
                footnotes.entries().concat()
            ));
        }
        parts.join(self.blocksep())
    }
}
