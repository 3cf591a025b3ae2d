//! Bottom-up document renderer with pluggable writer.

use std::collections::BTreeMap;
use std::error::Error as _;

use cw_ast::{Block, Document, Inline, NodeKind};
use tracing::error;

use crate::context::{Diagnostic, RenderContext};
use crate::writer::{HandlerError, HandlerResult, Writer};

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Final output of the writer's document handler.
    pub output: String,
    /// Nodes that rendered as nothing, in encounter order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Error that aborted a whole render (strict mode only).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A handler failed and strict mode is on.
    #[error("failed to render {kind} node")]
    Handler {
        /// Kind of the failing node.
        kind: NodeKind,
        /// Handler failure.
        #[source]
        source: HandlerError,
    },
}

/// Renders a [`Document`] with a [`Writer`].
///
/// Children are always rendered before their parent, so every handler gets
/// finished strings. Each call to [`render`](Self::render) works on fresh
/// [`RenderContext`] state.
///
/// # Failure policy
///
/// - A node kind the writer does not handle, or a tag the model does not
///   know, is logged and rendered empty.
/// - A failing handler (diagram pipeline) is logged and rendered empty; with
///   [`strict`](Self::strict) the render is aborted instead.
///
/// Both cases are reported in [`RenderResult::diagnostics`].
pub struct DocumentRenderer<W: Writer> {
    writer: W,
    strict: bool,
    variables: BTreeMap<String, String>,
}

impl<W: Writer> DocumentRenderer<W> {
    /// Create a renderer for `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            strict: false,
            variables: BTreeMap::new(),
        }
    }

    /// Abort the render when a handler fails instead of rendering it empty.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set template variables passed through to the document handler.
    #[must_use]
    pub fn with_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.variables = variables;
        self
    }

    /// The writer in use.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Render a document.
    pub fn render(&self, doc: &Document) -> Result<RenderResult, RenderError> {
        let mut walk = Walk {
            writer: &self.writer,
            strict: self.strict,
            cx: RenderContext::new(),
        };

        let body = walk.blocks(&doc.blocks)?;
        let output = self
            .writer
            .doc(&body, &doc.meta, &self.variables, walk.cx.footnotes());

        Ok(RenderResult {
            output,
            diagnostics: walk.cx.take_diagnostics(),
        })
    }
}

/// One pass over a document tree.
struct Walk<'w, W> {
    writer: &'w W,
    strict: bool,
    cx: RenderContext,
}

impl<W: Writer> Walk<'_, W> {
    fn inlines(&mut self, inlines: &[Inline]) -> Result<String, RenderError> {
        let mut out = String::new();
        for inline in inlines {
            out.push_str(&self.inline(inline)?);
        }
        Ok(out)
    }

    fn blocks(&mut self, blocks: &[Block]) -> Result<String, RenderError> {
        let mut rendered = Vec::with_capacity(blocks.len());
        for block in blocks {
            let out = self.block(block)?;
            if !out.is_empty() {
                rendered.push(out);
            }
        }
        Ok(rendered.join(self.writer.blocksep()))
    }

    fn inline(&mut self, inline: &Inline) -> Result<String, RenderError> {
        let w = self.writer;
        let result = match inline {
            Inline::Str(text) => Ok(w.str(text)),
            Inline::Space => Ok(w.space()),
            Inline::SoftBreak => Ok(w.soft_break()),
            Inline::LineBreak => Ok(w.line_break()),
            Inline::Emph(content) => Ok(w.emph(&self.inlines(content)?)),
            Inline::Strong(content) => Ok(w.strong(&self.inlines(content)?)),
            Inline::Subscript(content) => w.subscript(&self.inlines(content)?),
            Inline::Superscript(content) => w.superscript(&self.inlines(content)?),
            Inline::SmallCaps(content) => w.small_caps(&self.inlines(content)?),
            Inline::Strikeout(content) => w.strikeout(&self.inlines(content)?),
            Inline::Link {
                content,
                target,
                title,
                attr,
            } => Ok(w.link(&self.inlines(content)?, target, title, attr)),
            Inline::Image {
                content,
                src,
                title,
                attr,
            } => Ok(w.image(&self.inlines(content)?, src, title, attr)),
            Inline::CaptionedImage {
                src,
                title,
                caption,
                attr,
            } => {
                let caption = self.inlines(caption)?;
                w.captioned_image(&mut self.cx, src, title, &caption, attr)
            }
            Inline::Code { text, attr } => Ok(w.code(text, attr)),
            Inline::InlineMath(text) => w.inline_math(text),
            Inline::DisplayMath(text) => w.display_math(text),
            Inline::Note(blocks) => {
                let body = self.blocks(blocks)?;
                Ok(w.note(&mut self.cx, &body))
            }
            Inline::Span { content, attr } => w.span(&self.inlines(content)?, attr),
            Inline::RawInline { format, text } => w.raw_inline(format, text),
            Inline::Cite { citations, content } => w.cite(&self.inlines(content)?, citations),
            Inline::DoubleQuoted(content) => Ok(w.double_quoted(&self.inlines(content)?)),
            Inline::SingleQuoted(content) => Ok(w.single_quoted(&self.inlines(content)?)),
            Inline::Unknown(tag) => Err(HandlerError::UnknownTag(tag.clone())),
        };
        self.settle(inline.kind(), result)
    }

    fn block(&mut self, block: &Block) -> Result<String, RenderError> {
        let w = self.writer;
        let result = match block {
            Block::Plain(content) => Ok(w.plain(&self.inlines(content)?)),
            Block::Para(content) => Ok(w.para(&self.inlines(content)?)),
            Block::Header {
                level,
                content,
                attr,
            } => Ok(w.header(*level, &self.inlines(content)?, attr)),
            Block::BlockQuote(blocks) => Ok(w.block_quote(&self.blocks(blocks)?)),
            Block::HorizontalRule => Ok(w.horizontal_rule()),
            Block::LineBlock(lines) => {
                let lines = lines
                    .iter()
                    .map(|line| self.inlines(line))
                    .collect::<Result<Vec<_>, _>>()?;
                w.line_block(&lines)
            }
            Block::CodeBlock { text, attr } => w.code_block(text, attr),
            Block::BulletList(items) => Ok(w.bullet_list(&self.items(items)?)),
            Block::OrderedList { start, items } => {
                Ok(w.ordered_list(*start, &self.items(items)?))
            }
            Block::DefinitionList(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    let term = self.inlines(&item.term)?;
                    let definitions = self.items(&item.definitions)?;
                    rendered.push((term, definitions));
                }
                w.definition_list(&rendered)
            }
            Block::Table {
                caption,
                aligns,
                headers,
                rows,
            } => {
                let caption = self.inlines(caption)?;
                let headers = self.items(headers)?;
                let rows = rows
                    .iter()
                    .map(|row| self.items(row))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(w.table(&caption, aligns, &headers, &rows))
            }
            Block::RawBlock { format, text } => w.raw_block(format, text),
            Block::Div { content, attr } => w.div(&self.blocks(content)?, attr),
            Block::Unknown(tag) => Err(HandlerError::UnknownTag(tag.clone())),
        };
        self.settle(block.kind(), result)
    }

    /// Render each entry of a block sequence list (list items, table cells).
    fn items(&mut self, items: &[Vec<Block>]) -> Result<Vec<String>, RenderError> {
        items.iter().map(|blocks| self.blocks(blocks)).collect()
    }

    /// Turn a handler result into output, applying the failure policy.
    fn settle(&mut self, kind: NodeKind, result: HandlerResult) -> Result<String, RenderError> {
        match result {
            Ok(out) => Ok(out),
            Err(HandlerError::Unsupported(kind)) => {
                error!(%kind, "no handler for node kind, rendering it empty");
                self.cx.report(kind, "no handler for this node kind");
                Ok(String::new())
            }
            Err(err @ HandlerError::UnknownTag(_)) => {
                error!(error = %err, "unrecognized node, rendering it empty");
                self.cx.report(kind, err.to_string());
                Ok(String::new())
            }
            Err(err) => {
                let message = describe(&err);
                error!(%kind, error = %message, "node failed to render");
                if self.strict {
                    return Err(RenderError::Handler { kind, source: err });
                }
                self.cx.report(kind, message);
                Ok(String::new())
            }
        }
    }
}

/// Error message followed by its source chain.
fn describe(err: &HandlerError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
