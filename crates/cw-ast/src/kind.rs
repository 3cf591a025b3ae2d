//! Closed set of node kinds, used in diagnostics.

use std::fmt;

/// Every node kind the conversion engine may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Str,
    Space,
    SoftBreak,
    LineBreak,
    Emph,
    Strong,
    Subscript,
    Superscript,
    SmallCaps,
    Strikeout,
    Link,
    Image,
    CaptionedImage,
    Code,
    InlineMath,
    DisplayMath,
    Note,
    Span,
    RawInline,
    Cite,
    DoubleQuoted,
    SingleQuoted,
    Plain,
    Para,
    Header,
    BlockQuote,
    HorizontalRule,
    LineBlock,
    CodeBlock,
    BulletList,
    OrderedList,
    DefinitionList,
    Table,
    RawBlock,
    Div,
    /// Tag the model does not recognize.
    Unknown,
}

impl NodeKind {
    /// Tag name as it appears in the JSON tree.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "Str",
            Self::Space => "Space",
            Self::SoftBreak => "SoftBreak",
            Self::LineBreak => "LineBreak",
            Self::Emph => "Emph",
            Self::Strong => "Strong",
            Self::Subscript => "Subscript",
            Self::Superscript => "Superscript",
            Self::SmallCaps => "SmallCaps",
            Self::Strikeout => "Strikeout",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::CaptionedImage => "CaptionedImage",
            Self::Code => "Code",
            Self::InlineMath => "InlineMath",
            Self::DisplayMath => "DisplayMath",
            Self::Note => "Note",
            Self::Span => "Span",
            Self::RawInline => "RawInline",
            Self::Cite => "Cite",
            Self::DoubleQuoted => "DoubleQuoted",
            Self::SingleQuoted => "SingleQuoted",
            Self::Plain => "Plain",
            Self::Para => "Para",
            Self::Header => "Header",
            Self::BlockQuote => "BlockQuote",
            Self::HorizontalRule => "HorizontalRule",
            Self::LineBlock => "LineBlock",
            Self::CodeBlock => "CodeBlock",
            Self::BulletList => "BulletList",
            Self::OrderedList => "OrderedList",
            Self::DefinitionList => "DefinitionList",
            Self::Table => "Table",
            Self::RawBlock => "RawBlock",
            Self::Div => "Div",
            Self::Unknown => "Unknown",
        }
    }

    /// Kind named by a JSON tag. `None` for tags outside the model.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "Str" => Self::Str,
            "Space" => Self::Space,
            "SoftBreak" => Self::SoftBreak,
            "LineBreak" => Self::LineBreak,
            "Emph" => Self::Emph,
            "Strong" => Self::Strong,
            "Subscript" => Self::Subscript,
            "Superscript" => Self::Superscript,
            "SmallCaps" => Self::SmallCaps,
            "Strikeout" => Self::Strikeout,
            "Link" => Self::Link,
            "Image" => Self::Image,
            "CaptionedImage" => Self::CaptionedImage,
            "Code" => Self::Code,
            "InlineMath" => Self::InlineMath,
            "DisplayMath" => Self::DisplayMath,
            "Note" => Self::Note,
            "Span" => Self::Span,
            "RawInline" => Self::RawInline,
            "Cite" => Self::Cite,
            "DoubleQuoted" => Self::DoubleQuoted,
            "SingleQuoted" => Self::SingleQuoted,
            "Plain" => Self::Plain,
            "Para" => Self::Para,
            "Header" => Self::Header,
            "BlockQuote" => Self::BlockQuote,
            "HorizontalRule" => Self::HorizontalRule,
            "LineBlock" => Self::LineBlock,
            "CodeBlock" => Self::CodeBlock,
            "BulletList" => Self::BulletList,
            "OrderedList" => Self::OrderedList,
            "DefinitionList" => Self::DefinitionList,
            "Table" => Self::Table,
            "RawBlock" => Self::RawBlock,
            "Div" => Self::Div,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind appears in inline position.
    #[must_use]
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Str
                | Self::Space
                | Self::SoftBreak
                | Self::LineBreak
                | Self::Emph
                | Self::Strong
                | Self::Subscript
                | Self::Superscript
                | Self::SmallCaps
                | Self::Strikeout
                | Self::Link
                | Self::Image
                | Self::CaptionedImage
                | Self::Code
                | Self::InlineMath
                | Self::DisplayMath
                | Self::Note
                | Self::Span
                | Self::RawInline
                | Self::Cite
                | Self::DoubleQuoted
                | Self::SingleQuoted
        )
    }

    /// Whether this kind appears in block position.
    #[must_use]
    pub fn is_block(self) -> bool {
        self != Self::Unknown && !self.is_inline()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_tag_matches_as_str() {
        for tag in ["Str", "SingleQuoted", "Para", "Div", "CaptionedImage"] {
            assert_eq!(NodeKind::from_tag(tag).map(NodeKind::as_str), Some(tag));
        }
        assert_eq!(NodeKind::from_tag("Underline"), None);
        assert_eq!(NodeKind::from_tag("Unknown"), None);
    }

    #[test]
    fn test_position() {
        assert!(NodeKind::Note.is_inline());
        assert!(!NodeKind::Note.is_block());
        assert!(NodeKind::Table.is_block());
        assert!(!NodeKind::Unknown.is_inline());
        assert!(!NodeKind::Unknown.is_block());
    }
}
