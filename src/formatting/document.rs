// src/formatting/document.rs
//! Node rendering engine — converts the content tree to Markdown.
//!
//! `render_document` is pure, deterministic and total: every valid tree
//! produces output, with empty string for empty or unrenderable nodes.
//! Dispatch is an exhaustive match over `ContentNode`, one arm per kind.

use super::marks::apply_marks;
use crate::model::ContentNode;

/// Renders a content tree to Markdown.
///
/// Sibling block-level nodes are joined with a blank line; empty renders are
/// dropped before joining so stray blank sections never appear.
pub fn render_document(tree: &ContentNode) -> String {
    render_node(tree)
}

/// Renders a single node.
pub fn render_node(node: &ContentNode) -> String {
    match node {
        ContentNode::Text { text, marks } => apply_marks(text, marks),
        ContentNode::Paragraph { content } => render_inline(content),
        ContentNode::Heading { level, content } => {
            // Out-of-range levels are clamped rather than rendered literally;
            // a level-0 heading would otherwise produce a bare space.
            let level = (*level).clamp(1, 6) as usize;
            format!("{} {}", "#".repeat(level), render_inline(content))
        }
        ContentNode::BulletList { content } => {
            let items: Vec<String> = content
                .iter()
                .filter(|child| matches!(child, ContentNode::ListItem { .. }))
                .map(render_node)
                .filter(|text| !text.trim().is_empty())
                .map(|text| format!("- {}", text))
                .collect();
            items.join("\n")
        }
        ContentNode::OrderedList { start, content } => {
            let mut items = Vec::new();
            let mut index = *start;
            for child in content {
                if !matches!(child, ContentNode::ListItem { .. }) {
                    continue;
                }
                let text = render_node(child);
                if text.trim().is_empty() {
                    continue;
                }
                items.push(format!("{}. {}", index, text));
                index += 1;
            }
            items.join("\n")
        }
        ContentNode::ListItem { content } => {
            // A list item stays on one logical line: paragraph children
            // contribute their inline text, anything else renders recursively,
            // all joined with a single space.
            let parts: Vec<String> = content
                .iter()
                .map(|child| match child {
                    ContentNode::Paragraph { content } => render_inline(content),
                    other => render_node(other),
                })
                .collect();
            parts.join(" ")
        }
        ContentNode::Blockquote { content } => {
            let inner: Vec<String> = content.iter().map(render_node).collect();
            format!("> {}", inner.join("\n"))
        }
        ContentNode::CodeBlock { language, content } => {
            let code: String = content
                .iter()
                .filter_map(|child| match child {
                    ContentNode::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            format!("```{}\n{}\n```", language, code)
        }
        ContentNode::Table { content } => render_table(content),
        ContentNode::TableRow { content } => {
            let cells: Vec<String> = content
                .iter()
                .filter(|child| matches!(child, ContentNode::TableCell { .. }))
                .map(render_node)
                .collect();
            cells.join(" | ")
        }
        ContentNode::TableCell { content } => {
            let parts: Vec<String> = content
                .iter()
                .map(|child| match child {
                    ContentNode::Paragraph { content } => render_inline(content),
                    other => render_node(other),
                })
                .collect();
            parts.join(" ")
        }
        ContentNode::Image { src } => {
            // Alt and title are intentionally omitted. The src is the stored
            // URL at render time; local-path substitution is a later pass
            // over the rendered string.
            format!("![]({})", src)
        }
        ContentNode::HorizontalRule => "---".to_string(),
        ContentNode::Unknown { content } => match content {
            Some(children) => render_blocks(children),
            None => String::new(),
        },
    }
}

/// Renders a sequence of sibling block nodes, blank-line separated.
fn render_blocks(children: &[ContentNode]) -> String {
    let blocks: Vec<String> = children
        .iter()
        .map(render_node)
        .filter(|text| !text.trim().is_empty())
        .collect();
    blocks.join("\n\n")
}

/// Concatenates the inline text of the children, no separator.
///
/// Only text children carry inline content; any other kind contributes
/// nothing here.
fn render_inline(children: &[ContentNode]) -> String {
    children
        .iter()
        .map(|child| match child {
            ContentNode::Text { text, marks } => apply_marks(text, marks),
            _ => String::new(),
        })
        .collect()
}

fn render_table(rows: &[ContentNode]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        let ContentNode::TableRow { content } = row else {
            continue;
        };
        let cells: Vec<String> = content
            .iter()
            .filter(|child| matches!(child, ContentNode::TableCell { .. }))
            .map(render_node)
            .collect();
        if !cells.is_empty() {
            lines.push(format!("| {} |", cells.join(" | ")));
        }
    }

    if lines.is_empty() {
        return String::new();
    }

    // Separator column count follows the first row's non-empty pipe segments.
    let columns = lines[0]
        .split('|')
        .filter(|segment| !segment.trim().is_empty())
        .count();
    let separator = format!("| {} |", vec!["---"; columns].join(" | "));
    lines.insert(1, separator);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextMark;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> ContentNode {
        ContentNode::Text {
            text: value.to_string(),
            marks: vec![],
        }
    }

    fn paragraph(value: &str) -> ContentNode {
        ContentNode::Paragraph {
            content: vec![text(value)],
        }
    }

    fn list_item(value: &str) -> ContentNode {
        ContentNode::ListItem {
            content: vec![paragraph(value)],
        }
    }

    #[test]
    fn paragraph_concatenates_inline_children() {
        let node = ContentNode::Paragraph {
            content: vec![
                text("Hello "),
                ContentNode::Text {
                    text: "world".to_string(),
                    marks: vec![TextMark::Bold],
                },
            ],
        };
        assert_eq!(render_node(&node), "Hello **world**");
    }

    #[test]
    fn heading_level_is_clamped() {
        let h0 = ContentNode::Heading {
            level: 0,
            content: vec![text("Top")],
        };
        let h9 = ContentNode::Heading {
            level: 9,
            content: vec![text("Deep")],
        };
        assert_eq!(render_node(&h0), "# Top");
        assert_eq!(render_node(&h9), "###### Deep");
    }

    #[test]
    fn ordered_list_honors_start_attribute() {
        let node = ContentNode::OrderedList {
            start: 3,
            content: vec![list_item("first"), list_item("second")],
        };
        assert_eq!(render_node(&node), "3. first\n4. second");
    }

    #[test]
    fn ordered_list_index_skips_non_list_items() {
        let node = ContentNode::OrderedList {
            start: 1,
            content: vec![
                list_item("one"),
                paragraph("not an item"),
                list_item("two"),
            ],
        };
        assert_eq!(render_node(&node), "1. one\n2. two");
    }

    #[test]
    fn bullet_list_skips_non_list_items() {
        let node = ContentNode::BulletList {
            content: vec![list_item("a"), ContentNode::HorizontalRule, list_item("b")],
        };
        assert_eq!(render_node(&node), "- a\n- b");
    }

    #[test]
    fn blockquote_prefixes_once() {
        let node = ContentNode::Blockquote {
            content: vec![paragraph("line one"), paragraph("line two")],
        };
        assert_eq!(render_node(&node), "> line one\nline two");
    }

    #[test]
    fn code_block_wraps_in_fence_with_language() {
        let node = ContentNode::CodeBlock {
            language: "rust".to_string(),
            content: vec![text("let x = 1;")],
        };
        assert_eq!(render_node(&node), "```rust\nlet x = 1;\n```");
    }

    #[test]
    fn code_block_with_empty_language_is_a_bare_fence() {
        let node = ContentNode::CodeBlock {
            language: String::new(),
            content: vec![text("plain")],
        };
        assert_eq!(render_node(&node), "```\nplain\n```");
    }

    #[test]
    fn table_inserts_separator_after_header() {
        let cell = |value: &str| ContentNode::TableCell {
            content: vec![paragraph(value)],
        };
        let row = |values: &[&str]| ContentNode::TableRow {
            content: values.iter().map(|v| cell(v)).collect(),
        };
        let node = ContentNode::Table {
            content: vec![row(&["A", "B"]), row(&["1", "2"])],
        };
        assert_eq!(render_node(&node), "| A | B |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn table_without_valid_rows_is_empty() {
        let node = ContentNode::Table {
            content: vec![paragraph("stray")],
        };
        assert_eq!(render_node(&node), "");
    }

    #[test]
    fn image_omits_alt_text() {
        let node = ContentNode::Image {
            src: "https://host/pic.png".to_string(),
        };
        assert_eq!(render_node(&node), "![](https://host/pic.png)");
    }

    #[test]
    fn unknown_without_content_renders_empty() {
        let node = ContentNode::Unknown { content: None };
        assert_eq!(render_node(&node), "");
    }

    #[test]
    fn unknown_container_joins_children_with_blank_lines() {
        let node = ContentNode::Unknown {
            content: Some(vec![
                paragraph("first"),
                ContentNode::Unknown { content: None },
                paragraph("second"),
            ]),
        };
        // The empty child is dropped before joining — no stray blank section.
        assert_eq!(render_document(&node), "first\n\nsecond");
    }

    #[test]
    fn empty_tree_renders_empty_string() {
        let node = ContentNode::Unknown {
            content: Some(vec![]),
        };
        assert_eq!(render_document(&node), "");
    }
}
