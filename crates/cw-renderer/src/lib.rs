//! Bottom-up document renderer with pluggable writers.
//!
//! This crate provides a generic [`DocumentRenderer`] that walks a
//! [`cw_ast::Document`] and hands already-rendered child strings to a
//! [`Writer`], one handler per node kind.
//!
//! # Architecture
//!
//! - [`Writer`]: the handler table of one output format, plus the block
//!   separator and the final document assembly
//! - [`RenderContext`]: per-render state (footnotes, figure counter,
//!   diagnostics), created fresh for every document
//! - [`escape`], [`cdata`], [`attributes`]: shared escaping primitives
//!
//! Writers live in their own crates: `cw-confluence` (storage format) and
//! `cw-wiki` (wiki text).
//!
//! # Example
//!
//! ```ignore
//! use cw_renderer::DocumentRenderer;
//! use cw_confluence::StorageWriter;
//!
//! let doc: cw_ast::Document = serde_json::from_str(json)?;
//! let result = DocumentRenderer::new(StorageWriter::new()).render(&doc)?;
//! println!("{}", result.output);
//! ```

mod attributes;
mod context;
mod escape;
mod footnotes;
mod renderer;
mod writer;

pub use attributes::attributes;
pub use context::{Diagnostic, RenderContext};
pub use escape::{cdata, escape};
pub use footnotes::Footnotes;
pub use renderer::{DocumentRenderer, RenderError, RenderResult};
pub use writer::{
    HandlerError, HandlerResult, Writer, alignment_name, has_header, row_parity,
};
