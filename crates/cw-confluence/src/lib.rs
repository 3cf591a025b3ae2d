//! Confluence storage format writer.
//!
//! [`StorageWriter`] plugs into [`cw_renderer::DocumentRenderer`] and emits
//! XHTML storage markup ready to be sent as a page body.
//!
//! # Links
//!
//! - `confluence:SPACE:Page Title` becomes a page link (`ac:link` + `ri:page`)
//! - `#anchor` becomes a link to an anchor macro in the same page
//! - anything else is a plain `<a href>`
//!
//! # Diagrams
//!
//! Code blocks with a diagram class (`dot` or `graphviz` by default) are
//! rendered through a [`cw_diagrams::DiagramPipeline`] and embedded as
//! `data:` URI images.
//!
//! # Example
//!
//! ```ignore
//! use cw_confluence::StorageWriter;
//! use cw_renderer::DocumentRenderer;
//!
//! let result = DocumentRenderer::new(StorageWriter::new()).render(&doc)?;
//! ```

mod links;
mod macros;
mod storage;

pub use storage::{DEFAULT_STYLESHEET, StorageWriter};
