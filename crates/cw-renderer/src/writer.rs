//! Writer trait for format-specific rendering.
//!
//! A writer is a table of handlers, one per node kind. Every handler receives
//! the already-rendered strings of its children plus the node's raw values;
//! it never sees the child nodes themselves.

use std::collections::BTreeMap;

use cw_ast::{Alignment, Attributes, Citation, NodeKind};
use cw_diagrams::PipeError;

use crate::context::RenderContext;
use crate::footnotes::Footnotes;

/// Why a handler produced no output.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HandlerError {
    /// The writer has no handler for this kind.
    #[error("no handler for {0} nodes")]
    Unsupported(NodeKind),

    /// The input carried a tag the document model does not know.
    #[error("unknown node kind `{0}`")]
    UnknownTag(String),

    /// The diagram pipeline failed for a code block.
    #[error("diagram rendering failed for code block starting with {:?}", first_line(.content))]
    Diagram {
        /// Source text of the offending block.
        content: String,
        /// Pipeline failure.
        #[source]
        source: PipeError,
    },
}

fn first_line(content: &str) -> &str {
    content.lines().next().unwrap_or_default()
}

/// Result of a handler that may decline or fail.
pub type HandlerResult = Result<String, HandlerError>;

/// Handler table for one output format.
///
/// Handlers for constructs every format can express are required. The rest
/// default to [`HandlerError::Unsupported`], which the driver logs and
/// renders as nothing.
pub trait Writer {
    /// Separator inserted between sibling blocks.
    fn blocksep(&self) -> &str;

    // Inline handlers.

    fn str(&self, text: &str) -> String;
    fn space(&self) -> String;
    fn soft_break(&self) -> String;
    fn line_break(&self) -> String;
    fn emph(&self, content: &str) -> String;
    fn strong(&self, content: &str) -> String;

    fn subscript(&self, _content: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Subscript))
    }

    fn superscript(&self, _content: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Superscript))
    }

    fn small_caps(&self, _content: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::SmallCaps))
    }

    fn strikeout(&self, _content: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Strikeout))
    }

    /// Render a link. `target` and `title` are raw; `content` is rendered.
    fn link(&self, content: &str, target: &str, title: &str, attr: &Attributes) -> String;

    /// Render an image. `alt` is the rendered alternative text.
    fn image(&self, alt: &str, src: &str, title: &str, attr: &Attributes) -> String;

    /// Render a figure. May advance the figure counter in `cx`.
    fn captioned_image(
        &self,
        _cx: &mut RenderContext,
        _src: &str,
        _title: &str,
        _caption: &str,
        _attr: &Attributes,
    ) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::CaptionedImage))
    }

    fn code(&self, text: &str, attr: &Attributes) -> String;

    fn inline_math(&self, _text: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::InlineMath))
    }

    fn display_math(&self, _text: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::DisplayMath))
    }

    /// Store the rendered note body in `cx` and return the in-text reference.
    fn note(&self, cx: &mut RenderContext, body: &str) -> String;

    fn span(&self, _content: &str, _attr: &Attributes) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Span))
    }

    fn raw_inline(&self, _format: &str, _text: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::RawInline))
    }

    fn cite(&self, _content: &str, _citations: &[Citation]) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Cite))
    }

    fn double_quoted(&self, content: &str) -> String;
    fn single_quoted(&self, content: &str) -> String;

    // Block handlers.

    fn plain(&self, content: &str) -> String;
    fn para(&self, content: &str) -> String;
    fn header(&self, level: u8, content: &str, attr: &Attributes) -> String;
    fn block_quote(&self, content: &str) -> String;
    fn horizontal_rule(&self) -> String;

    fn line_block(&self, _lines: &[String]) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::LineBlock))
    }

    /// Render a code block. `text` is raw source.
    fn code_block(&self, text: &str, attr: &Attributes) -> HandlerResult;

    fn bullet_list(&self, items: &[String]) -> String;
    fn ordered_list(&self, start: u32, items: &[String]) -> String;

    fn definition_list(&self, _items: &[(String, Vec<String>)]) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::DefinitionList))
    }

    /// Render a table. `headers` has one entry per column; `rows` are in input order.
    fn table(
        &self,
        caption: &str,
        aligns: &[Alignment],
        headers: &[String],
        rows: &[Vec<String>],
    ) -> String;

    fn raw_block(&self, _format: &str, _text: &str) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::RawBlock))
    }

    fn div(&self, _content: &str, _attr: &Attributes) -> HandlerResult {
        Err(HandlerError::Unsupported(NodeKind::Div))
    }

    /// Assemble the final document.
    ///
    /// Called exactly once, after every block has been rendered. `variables`
    /// are opaque template values passed through from the caller.
    fn doc(
        &self,
        body: &str,
        meta: &BTreeMap<String, String>,
        variables: &BTreeMap<String, String>,
        footnotes: &Footnotes,
    ) -> String;
}

/// Alignment keyword for a table column; `AlignDefault` means left.
#[must_use]
pub fn alignment_name(align: Alignment) -> &'static str {
    match align {
        Alignment::AlignLeft | Alignment::AlignDefault => "left",
        Alignment::AlignRight => "right",
        Alignment::AlignCenter => "center",
    }
}

/// Parity class of a data row; the first row (index 0) is `odd`.
#[must_use]
pub fn row_parity(index: usize) -> &'static str {
    if index % 2 == 0 { "odd" } else { "even" }
}

/// Whether a header row has at least one non-empty cell.
///
/// A cell holding only whitespace still counts as content.
#[must_use]
pub fn has_header(headers: &[String]) -> bool {
    headers.iter().any(|cell| !cell.is_empty())
}
