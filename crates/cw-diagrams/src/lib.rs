//! Diagram rendering via external commands.
//!
//! This crate provides the pieces the writers need to turn a textual graph
//! description into an embeddable image:
//! - [`pipe`]: runs one external command against a temporary file with a timeout
//! - [`DiagramPipeline`]: layout command followed by an encoder, producing a
//!   `data:` URI that can be embedded as a self-contained image reference
//!
//! # Example
//!
//! ```ignore
//! use cw_diagrams::DiagramPipeline;
//!
//! let pipeline = DiagramPipeline::new();
//! let uri = pipeline.render("digraph { A -> B }")?;
//! assert!(uri.starts_with("data:image/png;base64,"));
//! ```

mod consts;
mod error;
mod pipe;
mod pipeline;

pub use error::PipeError;
pub use pipe::pipe;
pub use pipeline::DiagramPipeline;
