//! Whole-document rendering from the JSON tree form.

use cw_ast::{Document, NodeKind};
use cw_renderer::{DocumentRenderer, RenderResult};
use cw_wiki::WikiWriter;
use pretty_assertions::assert_eq;
use serde_json::json;

fn render(value: serde_json::Value) -> RenderResult {
    let doc: Document = serde_json::from_value(value).unwrap();
    DocumentRenderer::new(WikiWriter::new()).render(&doc).unwrap()
}

#[test]
fn test_heading_and_paragraph() {
    let result = render(json!({
        "meta": {"title": "Guide"},
        "blocks": [
            {"t": "Header", "c": {"level": 1, "content": [{"t": "Str", "c": "Intro"}], "attr": {"id": "intro"}}},
            {"t": "Para", "c": [
                {"t": "Strong", "c": [{"t": "Str", "c": "Bold"}]},
                {"t": "Space"},
                {"t": "Emph", "c": [{"t": "Str", "c": "text"}]}
            ]}
        ]
    }));
    assert_eq!(result.output, "h1. {anchor:intro}Intro\n\n*Bold* _text_");
}

#[test]
fn test_nested_lists_flatten() {
    let result = render(json!({
        "blocks": [{"t": "BulletList", "c": [
            [{"t": "Plain", "c": [{"t": "Str", "c": "a"}]}],
            [
                {"t": "Plain", "c": [{"t": "Str", "c": "b"}]},
                {"t": "OrderedList", "c": {"items": [
                    [{"t": "Plain", "c": [{"t": "Str", "c": "c"}]}],
                    [{"t": "Plain", "c": [{"t": "Str", "c": "d"}]}]
                ]}}
            ]
        ]}]
    }));
    assert_eq!(result.output, "* a\n* b\n*# c\n*# d");
}

#[test]
fn test_math_trapped_and_reported() {
    let result = render(json!({
        "blocks": [{"t": "Para", "c": [
            {"t": "Str", "c": "area"},
            {"t": "Space"},
            {"t": "InlineMath", "c": "\\pi r^2"}
        ]}]
    }));
    assert_eq!(result.output, "area ");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, NodeKind::InlineMath);
}

#[test]
fn test_footnotes_after_rule() {
    let result = render(json!({
        "blocks": [{"t": "Para", "c": [
            {"t": "Str", "c": "a"},
            {"t": "Note", "c": [{"t": "Para", "c": [{"t": "Str", "c": "one"}]}]},
            {"t": "Str", "c": "b"},
            {"t": "Note", "c": [{"t": "Para", "c": [{"t": "Str", "c": "two"}]}]}
        ]}]
    }));
    assert_eq!(
        result.output,
        concat!(
            "a{anchor:fnref1}[^1^|#fn1]b{anchor:fnref2}[^2^|#fn2]\n\n",
            "----\n",
            "# {anchor:fn1}one [\u{21a9}|#fnref1]\n",
            "# {anchor:fn2}two [\u{21a9}|#fnref2]"
        )
    );
}

#[test]
fn test_figures_numbered_per_render() {
    let doc: Document = serde_json::from_value(json!({
        "blocks": [{"t": "Para", "c": [
            {"t": "CaptionedImage", "c": {"src": "a.png", "caption": [{"t": "Str", "c": "Overview"}]}}
        ]}]
    }))
    .unwrap();
    let renderer = DocumentRenderer::new(WikiWriter::new());

    let first = renderer.render(&doc).unwrap();
    let second = renderer.render(&doc).unwrap();
    assert_eq!(first.output, "!a.png!\nFIGURE 1. Overview");
    assert_eq!(second.output, first.output);
}
