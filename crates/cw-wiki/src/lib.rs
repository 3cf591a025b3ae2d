//! Confluence wiki text writer.
//!
//! [`WikiWriter`] plugs into [`cw_renderer::DocumentRenderer`] and emits the
//! line-oriented wiki markup (`h1.`, `*bold*`, `||header||`, `{code}`).
//!
//! Nested list items are flattened: every line of an item gets its own
//! marker, and lines that already start with a marker gain one more level.
//! Math has no wiki construct and is reported as unsupported.

mod lists;
mod writer;

pub use writer::WikiWriter;
