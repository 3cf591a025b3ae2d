//! Wiki text handler table.

use std::collections::BTreeMap;
use std::fmt::Write;

use cw_ast::{Alignment, Attributes, Citation};
use cw_diagrams::DiagramPipeline;
use cw_renderer::{
    Footnotes, HandlerError, HandlerResult, RenderContext, Writer, escape, has_header,
};
use tracing::debug;

use crate::lists::mark_items;

/// Raw format emitted verbatim.
const NATIVE_FORMAT: &str = "wiki";

/// Confluence wiki text writer.
///
/// Links are emitted as `[label|target]` regardless of scheme; wiki text
/// addresses pages by plain title, so `confluence:` targets pass through.
pub struct WikiWriter {
    diagrams: DiagramPipeline,
}

impl WikiWriter {
    /// Create a writer with the default diagram commands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagrams: DiagramPipeline::new(),
        }
    }

    /// Use `pipeline` for diagram code blocks.
    #[must_use]
    pub fn with_diagrams(mut self, pipeline: DiagramPipeline) -> Self {
        self.diagrams = pipeline;
        self
    }
}

impl Default for WikiWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn raw(format: &str, text: &str) -> String {
    match format {
        NATIVE_FORMAT => text.to_owned(),
        "html" => format!("{{html}}\n{text}\n{{html}}"),
        _ => {
            debug!(format, "discarding raw content for another format");
            String::new()
        }
    }
}

/// Table cells must stay on one line, and `||` would read as a header cell.
fn cell(content: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        " ".to_owned()
    } else {
        lines.join(" \\\\ ")
    }
}

/// Footnote bodies are list entries, so they are folded onto one line.
fn fold(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Writer for WikiWriter {
    fn blocksep(&self) -> &str {
        "\n\n"
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
        "\\\\\n".to_owned()
    }

    fn emph(&self, content: &str) -> String {
        format!("_{content}_")
    }

    fn strong(&self, content: &str) -> String {
        format!("*{content}*")
    }

    fn subscript(&self, content: &str) -> HandlerResult {
        Ok(format!("~{content}~"))
    }

    fn superscript(&self, content: &str) -> HandlerResult {
        Ok(format!("^{content}^"))
    }

    fn small_caps(&self, content: &str) -> HandlerResult {
        Ok(content.to_owned())
    }

    fn strikeout(&self, content: &str) -> HandlerResult {
        Ok(format!("-{content}-"))
    }

    fn link(&self, content: &str, target: &str, title: &str, _attr: &Attributes) -> String {
        let mut out = String::from("[");
        if !content.is_empty() {
            write!(out, "{content}|").unwrap();
        }
        out.push_str(target);
        if !title.is_empty() {
            write!(out, "|{}", escape(title)).unwrap();
        }
        out.push(']');
        out
    }

    fn image(&self, _alt: &str, src: &str, title: &str, _attr: &Attributes) -> String {
        if title.is_empty() {
            format!("!{src}!")
        } else {
            format!("!{src}|title={}!", escape(title))
        }
    }

    fn captioned_image(
        &self,
        cx: &mut RenderContext,
        src: &str,
        title: &str,
        caption: &str,
        _attr: &Attributes,
    ) -> HandlerResult {
        let n = cx.next_figure();
        let caption = if caption.is_empty() {
            escape(title)
        } else {
            caption.to_owned()
        };
        Ok(format!("!{src}!\nFIGURE {n}. {caption}"))
    }

    fn code(&self, text: &str, _attr: &Attributes) -> String {
        format!("{{{{{}}}}}", escape(text))
    }

    fn note(&self, cx: &mut RenderContext, body: &str) -> String {
        let n = cx.footnotes_mut().add_with(|n| {
            format!("{{anchor:fn{n}}}{} [\u{21a9}|#fnref{n}]", fold(body))
        });
        format!("{{anchor:fnref{n}}}[^{n}^|#fn{n}]")
    }

    fn span(&self, content: &str, _attr: &Attributes) -> HandlerResult {
        Ok(content.to_owned())
    }

    fn raw_inline(&self, format: &str, text: &str) -> HandlerResult {
        Ok(raw(format, text))
    }

    fn cite(&self, content: &str, _citations: &[Citation]) -> HandlerResult {
        Ok(content.to_owned())
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
        content.to_owned()
    }

    fn header(&self, level: u8, content: &str, attr: &Attributes) -> String {
        let level = level.clamp(1, 6);
        match attr.id() {
            Some(id) => format!("h{level}. {{anchor:{id}}}{content}"),
            None => format!("h{level}. {content}"),
        }
    }

    fn block_quote(&self, content: &str) -> String {
        format!("{{quote}}\n{content}\n{{quote}}")
    }

    fn horizontal_rule(&self) -> String {
        "----".to_owned()
    }

    fn line_block(&self, lines: &[String]) -> HandlerResult {
        Ok(lines.join(&self.line_break()))
    }

    /// Code macro bodies are literal, so the text is not escaped.
    fn code_block(&self, text: &str, attr: &Attributes) -> HandlerResult {
        if self.diagrams.matches(attr) {
            let uri = self
                .diagrams
                .render(text)
                .map_err(|source| HandlerError::Diagram {
                    content: text.to_owned(),
                    source,
                })?;
            return Ok(format!("!{uri}!"));
        }
        Ok(match attr.classes().next() {
            Some(language) => format!("{{code:{language}}}\n{text}\n{{code}}"),
            None => format!("{{code}}\n{text}\n{{code}}"),
        })
    }

    fn bullet_list(&self, items: &[String]) -> String {
        mark_items('*', items)
    }

    fn ordered_list(&self, start: u32, items: &[String]) -> String {
        if start != 1 {
            debug!(start, "wiki lists always start at 1");
        }
        mark_items('#', items)
    }

    fn definition_list(&self, items: &[(String, Vec<String>)]) -> HandlerResult {
        let mut lines = Vec::new();
        for (term, definitions) in items {
            lines.push(format!("*{term}*"));
            lines.extend(definitions.iter().cloned());
        }
        Ok(lines.join("\n"))
    }

    fn table(
        &self,
        caption: &str,
        _aligns: &[Alignment],
        headers: &[String],
        rows: &[Vec<String>],
    ) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 2);
        if !caption.is_empty() {
            lines.push(caption.to_owned());
        }
        if has_header(headers) {
            let mut line = String::from("||");
            for header in headers {
                write!(line, "{}||", cell(header)).unwrap();
            }
            lines.push(line);
        }
        for row in rows {
            let mut line = String::from("|");
            for value in row {
                write!(line, "{}|", cell(value)).unwrap();
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    fn raw_block(&self, format: &str, text: &str) -> HandlerResult {
        Ok(raw(format, text))
    }

    fn div(&self, content: &str, attr: &Attributes) -> HandlerResult {
        let params: Vec<String> = attr
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        if params.is_empty() {
            Ok(format!("{{div}}\n{content}\n{{div}}"))
        } else {
            Ok(format!("{{div:{}}}\n{content}\n{{div}}", params.join("|")))
        }
    }

    fn doc(
        &self,
        body: &str,
        _meta: &BTreeMap<String, String>,
        _variables: &BTreeMap<String, String>,
        footnotes: &Footnotes,
    ) -> String {
        if footnotes.is_empty() {
            return body.to_owned();
        }
        let entries: Vec<String> = footnotes
            .entries()
            .iter()
            .map(|entry| format!("# {entry}"))
            .collect();
        let notes = format!("----\n{}", entries.join("\n"));
        if body.is_empty() {
            notes
        } else {
            format!("{body}{}{notes}", self.blocksep())
        }
    }
}
