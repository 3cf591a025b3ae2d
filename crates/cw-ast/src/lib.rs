//! Document tree model consumed by the `cw` writers.
//!
//! The tree is produced by an external conversion engine and handed to the
//! writers as JSON. Nodes use adjacent tagging (`{"t": "Para", "c": [...]}`),
//! which is the convention used by common document-conversion engines.
//! Tags the model does not know decode as `Unknown` nodes, so a newer
//! engine never makes a whole document unreadable.
//!
//! # Example
//!
//! ```
//! use cw_ast::{Block, Document, Inline};
//!
//! let json = r#"{"blocks": [{"t": "Para", "c": [{"t": "Str", "c": "Hello"}]}]}"#;
//! let doc: Document = serde_json::from_str(json).unwrap();
//! assert_eq!(doc.blocks, vec![Block::Para(vec![Inline::Str("Hello".to_owned())])]);
//! ```

mod attributes;
mod kind;
mod node;
mod tagged;

pub use attributes::Attributes;
pub use kind::NodeKind;
pub use node::{Alignment, Block, Citation, DefinitionItem, Document, Inline};
