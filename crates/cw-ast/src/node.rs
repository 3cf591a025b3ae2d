//! Block and inline node variants.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::attributes::Attributes;
use crate::kind::NodeKind;
use crate::tagged;

/// A whole document: metadata plus top-level blocks.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Document {
    /// Flat metadata mapping (title, author, ...).
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

/// Column alignment of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Alignment {
    AlignLeft,
    AlignRight,
    AlignCenter,
    #[default]
    AlignDefault,
}

/// One entry in a citation list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Citation {
    /// Citation key, e.g. `doe99`.
    pub id: String,
}

/// Term with its definitions.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DefinitionItem {
    pub term: Vec<Inline>,
    pub definitions: Vec<Vec<Block>>,
}

/// Inline node.
///
/// A tag that names no inline kind decodes as [`Inline::Unknown`] instead of
/// failing the whole document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(remote = "Self", tag = "t", content = "c")]
pub enum Inline {
    Str(String),
    Space,
    SoftBreak,
    LineBreak,
    Emph(Vec<Inline>),
    Strong(Vec<Inline>),
    Subscript(Vec<Inline>),
    Superscript(Vec<Inline>),
    SmallCaps(Vec<Inline>),
    Strikeout(Vec<Inline>),
    Link {
        content: Vec<Inline>,
        target: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        attr: Attributes,
    },
    Image {
        /// Alternative text.
        content: Vec<Inline>,
        src: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        attr: Attributes,
    },
    /// Image that stands alone as a figure with a caption.
    CaptionedImage {
        src: String,
        #[serde(default)]
        title: String,
        caption: Vec<Inline>,
        #[serde(default)]
        attr: Attributes,
    },
    Code {
        text: String,
        #[serde(default)]
        attr: Attributes,
    },
    InlineMath(String),
    DisplayMath(String),
    /// Footnote; the body is block content.
    Note(Vec<Block>),
    Span {
        content: Vec<Inline>,
        #[serde(default)]
        attr: Attributes,
    },
    RawInline {
        format: String,
        text: String,
    },
    Cite {
        citations: Vec<Citation>,
        content: Vec<Inline>,
    },
    DoubleQuoted(Vec<Inline>),
    SingleQuoted(Vec<Inline>),
    /// Node with an unrecognized tag; holds the tag.
    #[serde(skip)]
    Unknown(String),
}

/// Block node.
///
/// Unrecognized tags decode as [`Block::Unknown`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(remote = "Self", tag = "t", content = "c")]
pub enum Block {
    Plain(Vec<Inline>),
    Para(Vec<Inline>),
    Header {
        level: u8,
        content: Vec<Inline>,
        #[serde(default)]
        attr: Attributes,
    },
    BlockQuote(Vec<Block>),
    HorizontalRule,
    LineBlock(Vec<Vec<Inline>>),
    CodeBlock {
        text: String,
        #[serde(default)]
        attr: Attributes,
    },
    BulletList(Vec<Vec<Block>>),
    OrderedList {
        #[serde(default = "first_number")]
        start: u32,
        items: Vec<Vec<Block>>,
    },
    DefinitionList(Vec<DefinitionItem>),
    Table {
        #[serde(default)]
        caption: Vec<Inline>,
        aligns: Vec<Alignment>,
        headers: Vec<Vec<Block>>,
        rows: Vec<Vec<Vec<Block>>>,
    },
    RawBlock {
        format: String,
        text: String,
    },
    Div {
        content: Vec<Block>,
        #[serde(default)]
        attr: Attributes,
    },
    /// Node with an unrecognized tag; holds the tag.
    #[serde(skip)]
    Unknown(String),
}

fn first_number() -> u32 {
    1
}

impl<'de> Deserialize<'de> for Inline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tag, value) = tagged::buffer(deserializer)?;
        if !NodeKind::from_tag(&tag).is_some_and(NodeKind::is_inline) {
            return Ok(Self::Unknown(tag));
        }
        Self::deserialize(value).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tag, value) = tagged::buffer(deserializer)?;
        if !NodeKind::from_tag(&tag).is_some_and(NodeKind::is_block) {
            return Ok(Self::Unknown(tag));
        }
        Self::deserialize(value).map_err(D::Error::custom)
    }
}

impl Inline {
    /// Kind tag of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Str(_) => NodeKind::Str,
            Self::Space => NodeKind::Space,
            Self::SoftBreak => NodeKind::SoftBreak,
            Self::LineBreak => NodeKind::LineBreak,
            Self::Emph(_) => NodeKind::Emph,
            Self::Strong(_) => NodeKind::Strong,
            Self::Subscript(_) => NodeKind::Subscript,
            Self::Superscript(_) => NodeKind::Superscript,
            Self::SmallCaps(_) => NodeKind::SmallCaps,
            Self::Strikeout(_) => NodeKind::Strikeout,
            Self::Link { .. } => NodeKind::Link,
            Self::Image { .. } => NodeKind::Image,
            Self::CaptionedImage { .. } => NodeKind::CaptionedImage,
            Self::Code { .. } => NodeKind::Code,
            Self::InlineMath(_) => NodeKind::InlineMath,
            Self::DisplayMath(_) => NodeKind::DisplayMath,
            Self::Note(_) => NodeKind::Note,
            Self::Span { .. } => NodeKind::Span,
            Self::RawInline { .. } => NodeKind::RawInline,
            Self::Cite { .. } => NodeKind::Cite,
            Self::DoubleQuoted(_) => NodeKind::DoubleQuoted,
            Self::SingleQuoted(_) => NodeKind::SingleQuoted,
            Self::Unknown(_) => NodeKind::Unknown,
        }
    }
}

impl Block {
    /// Kind tag of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Plain(_) => NodeKind::Plain,
            Self::Para(_) => NodeKind::Para,
            Self::Header { .. } => NodeKind::Header,
            Self::BlockQuote(_) => NodeKind::BlockQuote,
            Self::HorizontalRule => NodeKind::HorizontalRule,
            Self::LineBlock(_) => NodeKind::LineBlock,
            Self::CodeBlock { .. } => NodeKind::CodeBlock,
            Self::BulletList(_) => NodeKind::BulletList,
            Self::OrderedList { .. } => NodeKind::OrderedList,
            Self::DefinitionList(_) => NodeKind::DefinitionList,
            Self::Table { .. } => NodeKind::Table,
            Self::RawBlock { .. } => NodeKind::RawBlock,
            Self::Div { .. } => NodeKind::Div,
            Self::Unknown(_) => NodeKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unit_variants_without_content() {
        let inline: Inline = serde_json::from_str(r#"{"t": "Space"}"#).unwrap();
        assert_eq!(inline, Inline::Space);

        let block: Block = serde_json::from_str(r#"{"t": "HorizontalRule"}"#).unwrap();
        assert_eq!(block, Block::HorizontalRule);
    }

    #[test]
    fn test_link_defaults() {
        let json = r##"{"t": "Link", "c": {"content": [{"t": "Str", "c": "x"}], "target": "#sec1"}}"##;
        let inline: Inline = serde_json::from_str(json).unwrap();
        assert_eq!(
            inline,
            Inline::Link {
                content: vec![Inline::Str("x".to_owned())],
                target: "#sec1".to_owned(),
                title: String::new(),
                attr: Attributes::new(),
            }
        );
    }

    #[test]
    fn test_code_block_attributes() {
        let json = r#"{"t": "CodeBlock", "c": {"text": "x=1", "attr": {"class": "python"}}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let Block::CodeBlock { text, attr } = block else {
            panic!("expected code block");
        };
        assert_eq!(text, "x=1");
        assert!(attr.has_class("python"));
    }

    #[test]
    fn test_ordered_list_default_start() {
        let json = r#"{"t": "OrderedList", "c": {"items": [[{"t": "Plain", "c": []}]]}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(matches!(block, Block::OrderedList { start: 1, .. }));
    }

    #[test]
    fn test_table() {
        let json = r#"{"t": "Table", "c": {
            "aligns": ["AlignLeft", "AlignDefault"],
            "headers": [[], []],
            "rows": [[[{"t": "Plain", "c": [{"t": "Str", "c": "1"}]}], []]]
        }}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let Block::Table {
            caption,
            aligns,
            headers,
            rows,
        } = block
        else {
            panic!("expected table");
        };
        assert!(caption.is_empty());
        assert_eq!(aligns, vec![Alignment::AlignLeft, Alignment::AlignDefault]);
        assert_eq!(headers.len(), 2);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_document_meta_is_optional() {
        let doc: Document = serde_json::from_str(r#"{"blocks": []}"#).unwrap();
        assert!(doc.meta.is_empty());
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_unknown_inline_keeps_siblings() {
        let json = r#"{"t": "Para", "c": [
            {"t": "Str", "c": "kept"},
            {"t": "Underline", "c": [{"t": "Str", "c": "x"}]}
        ]}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(
            block,
            Block::Para(vec![
                Inline::Str("kept".to_owned()),
                Inline::Unknown("Underline".to_owned()),
            ])
        );
    }

    #[test]
    fn test_unknown_block() {
        let json = r#"{"blocks": [
            {"t": "Figure", "c": {"anything": [1, 2]}},
            {"t": "HorizontalRule"}
        ]}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(
            doc.blocks,
            vec![Block::Unknown("Figure".to_owned()), Block::HorizontalRule]
        );
    }

    #[test]
    fn test_block_tag_in_inline_position_is_unknown() {
        let inline: Inline = serde_json::from_str(r#"{"t": "Para", "c": []}"#).unwrap();
        assert_eq!(inline, Inline::Unknown("Para".to_owned()));
    }

    #[test]
    fn test_known_tag_with_bad_content_is_error() {
        let err = serde_json::from_str::<Inline>(r#"{"t": "Str", "c": 3}"#).unwrap_err();
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn test_node_without_tag_is_error() {
        assert!(serde_json::from_str::<Block>(r#"{"c": []}"#).is_err());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Inline::Note(vec![]).kind(), NodeKind::Note);
        assert_eq!(Block::BulletList(vec![]).kind(), NodeKind::BulletList);
        assert_eq!(Inline::Unknown("X".to_owned()).kind(), NodeKind::Unknown);
    }
}
