// src/model/node.rs
//! The rich-text content tree as it arrives in the export.
//!
//! Wire shape per node:
//! `{ "type": ..., "attrs": {...}, "content": [...], "text": ..., "marks": [...] }`.
//! Deserialization goes through an intermediate representation so that node kinds
//! this tool does not recognize land in `ContentNode::Unknown` (keeping their
//! children, if any) instead of failing the whole document.

use serde::Deserialize;

/// One node of the structured content tree.
///
/// The node kind determines which attributes are meaningful; every other
/// attribute present on the wire is ignored. A node without children is valid
/// and renders as empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "NodeRepr")]
pub enum ContentNode {
    Text {
        text: String,
        marks: Vec<TextMark>,
    },
    Paragraph {
        content: Vec<ContentNode>,
    },
    Heading {
        level: i64,
        content: Vec<ContentNode>,
    },
    BulletList {
        content: Vec<ContentNode>,
    },
    OrderedList {
        start: i64,
        content: Vec<ContentNode>,
    },
    ListItem {
        content: Vec<ContentNode>,
    },
    Blockquote {
        content: Vec<ContentNode>,
    },
    CodeBlock {
        language: String,
        content: Vec<ContentNode>,
    },
    Table {
        content: Vec<ContentNode>,
    },
    TableRow {
        content: Vec<ContentNode>,
    },
    TableCell {
        content: Vec<ContentNode>,
    },
    /// Covers both the `image` and `imageResize` wire kinds.
    Image {
        src: String,
    },
    HorizontalRule,
    /// Any kind this tool does not recognize. With children it renders as a
    /// generic container; without children it renders to nothing.
    Unknown {
        content: Option<Vec<ContentNode>>,
    },
}

/// An inline formatting annotation attached to a text node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "MarkRepr")]
pub enum TextMark {
    Bold,
    Italic,
    Code,
    Strike,
    Link { href: String },
    Unknown,
}

/// Raw wire representation of a node, before kind dispatch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NodeRepr {
    #[serde(rename = "type")]
    kind: String,
    attrs: NodeAttrs,
    content: Option<Vec<ContentNode>>,
    text: String,
    marks: Vec<TextMark>,
}

/// Kind-specific attributes. Only the ones a recognized kind reads are kept;
/// serde ignores the rest of the `attrs` object.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NodeAttrs {
    level: Option<i64>,
    start: Option<i64>,
    language: Option<String>,
    src: Option<String>,
}

impl From<NodeRepr> for ContentNode {
    fn from(repr: NodeRepr) -> Self {
        let children = repr.content.clone().unwrap_or_default();
        match repr.kind.as_str() {
            "text" => ContentNode::Text {
                text: repr.text,
                marks: repr.marks,
            },
            "paragraph" => ContentNode::Paragraph { content: children },
            "heading" => ContentNode::Heading {
                level: repr.attrs.level.unwrap_or(1),
                content: children,
            },
            "bulletList" => ContentNode::BulletList { content: children },
            "orderedList" => ContentNode::OrderedList {
                start: repr.attrs.start.unwrap_or(1),
                content: children,
            },
            "listItem" => ContentNode::ListItem { content: children },
            "blockquote" => ContentNode::Blockquote { content: children },
            "codeBlock" => ContentNode::CodeBlock {
                language: repr.attrs.language.unwrap_or_default(),
                content: children,
            },
            "table" => ContentNode::Table { content: children },
            "tableRow" => ContentNode::TableRow { content: children },
            "tableCell" => ContentNode::TableCell { content: children },
            "image" | "imageResize" => ContentNode::Image {
                src: repr.attrs.src.unwrap_or_default(),
            },
            "horizontalRule" => ContentNode::HorizontalRule,
            _ => ContentNode::Unknown {
                content: repr.content,
            },
        }
    }
}

/// Raw wire representation of a mark.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MarkRepr {
    #[serde(rename = "type")]
    kind: String,
    attrs: MarkAttrs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MarkAttrs {
    href: Option<String>,
}

impl From<MarkRepr> for TextMark {
    fn from(repr: MarkRepr) -> Self {
        match repr.kind.as_str() {
            "bold" => TextMark::Bold,
            "italic" => TextMark::Italic,
            "code" => TextMark::Code,
            "strike" => TextMark::Strike,
            // Missing href falls back to a placeholder anchor rather than
            // dropping the link wrapper.
            "link" => TextMark::Link {
                href: repr.attrs.href.unwrap_or_else(|| "#".to_string()),
            },
            _ => TextMark::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ContentNode {
        serde_json::from_str(json).expect("node should deserialize")
    }

    #[test]
    fn text_node_with_marks() {
        let node = parse(
            r#"{"type":"text","text":"hi","marks":[{"type":"bold"},{"type":"link","attrs":{"href":"https://x"}}]}"#,
        );
        assert_eq!(
            node,
            ContentNode::Text {
                text: "hi".to_string(),
                marks: vec![
                    TextMark::Bold,
                    TextMark::Link {
                        href: "https://x".to_string()
                    }
                ],
            }
        );
    }

    #[test]
    fn link_mark_without_href_defaults_to_anchor() {
        let node = parse(r#"{"type":"text","text":"t","marks":[{"type":"link"}]}"#);
        let ContentNode::Text { marks, .. } = node else {
            panic!("expected text node");
        };
        assert_eq!(
            marks,
            vec![TextMark::Link {
                href: "#".to_string()
            }]
        );
    }

    #[test]
    fn heading_level_defaults_to_one() {
        let node = parse(r#"{"type":"heading","content":[]}"#);
        assert_eq!(
            node,
            ContentNode::Heading {
                level: 1,
                content: vec![]
            }
        );
    }

    #[test]
    fn unrecognized_kind_keeps_children() {
        let node = parse(r#"{"type":"panel","content":[{"type":"horizontalRule"}]}"#);
        assert_eq!(
            node,
            ContentNode::Unknown {
                content: Some(vec![ContentNode::HorizontalRule])
            }
        );
    }

    #[test]
    fn unrecognized_kind_without_content() {
        let node = parse(r#"{"type":"mention","attrs":{"id":"u1"}}"#);
        assert_eq!(node, ContentNode::Unknown { content: None });
    }

    #[test]
    fn image_resize_is_an_image() {
        let node = parse(r#"{"type":"imageResize","attrs":{"src":"https://host/a.png"}}"#);
        assert_eq!(
            node,
            ContentNode::Image {
                src: "https://host/a.png".to_string()
            }
        );
    }
}
