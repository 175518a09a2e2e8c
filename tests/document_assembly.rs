// tests/document_assembly.rs
//! End-to-end assembly: export payload in, finished Markdown document out.

use pretty_assertions::assert_eq;
use serde_json::json;
use topics2md::{payload, ArticleAssembler};

fn export_fixture() -> serde_json::Value {
    let content = json!({
        "type": "doc",
        "content": [
            {"type": "heading", "attrs": {"level": 2}, "content": [
                {"type": "text", "text": "Background"}
            ]},
            {"type": "paragraph", "content": [
                {"type": "text", "text": "The grid is "},
                {"type": "text", "text": "aging", "marks": [{"type": "bold"}]},
                {"type": "text", "text": ", see "},
                {"type": "text", "text": "the report", "marks": [
                    {"type": "italic"},
                    {"type": "link", "attrs": {"href": "https://example.org/report"}}
                ]},
                {"type": "text", "text": "."}
            ]},
            {"type": "orderedList", "attrs": {"start": 3}, "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Assess"}]}
                ]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Rebuild"}]}
                ]}
            ]},
            {"type": "table", "content": [
                {"type": "tableRow", "content": [
                    {"type": "tableCell", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "A"}]}
                    ]},
                    {"type": "tableCell", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "B"}]}
                    ]}
                ]},
                {"type": "tableRow", "content": [
                    {"type": "tableCell", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "1"}]}
                    ]},
                    {"type": "tableCell", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "2"}]}
                    ]}
                ]}
            ]},
            {"type": "blockquote", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "A quoted remark."}]}
            ]},
            {"type": "codeBlock", "attrs": {"language": "sql"}, "content": [
                {"type": "text", "text": "SELECT 1;"}
            ]},
            {"type": "decorationStrip", "attrs": {"color": "blue"}},
            {"type": "horizontalRule"}
        ]
    });

    // Gateway envelope shape: the payload nests one level inside a JSON string.
    let body = json!({
        "meta": {"limit": 5, "offset": 0},
        "topics": [{
            "id": "f81d4fae",
            "title": "Rebuilding the Grid",
            "authors": ["Ada Lovelace", "Grace Hopper"],
            "tags": ["energy"],
            "countries": ["de", "fr"],
            "channels": ["Power"],
            "last_edited_date": "2024-06-15T08:30:00Z",
            "key_takeaways": "Modernization is overdue.",
            "content": content
        }]
    });
    json!({"statusCode": 200, "body": body.to_string()})
}

#[tokio::test]
async fn envelope_payload_becomes_the_expected_document() {
    let articles = payload::parse_export(export_fixture()).unwrap();
    assert_eq!(articles.len(), 1);

    let document = ArticleAssembler::new(None)
        .assemble(&articles[0])
        .await
        .unwrap();

    let expected = "\
# Rebuilding the Grid

## Basic Information
- **ID**: f81d4fae
- **Author**: Ada Lovelace and Grace Hopper
- **Last Edited**: 2024-06-15

## Categories
- **Channels**: Power
- **Tags**: `energy`
- **Countries**: **DE** | **FR**

## Key Takeaways
Modernization is overdue.

## Article Content
## Background

The grid is **aging**, see [*the report*](https://example.org/report).

3. Assess
4. Rebuild

| A | B |
| --- | --- |
| 1 | 2 |

> A quoted remark.

```sql
SELECT 1;
```

---
";
    assert_eq!(document, expected);
}

#[tokio::test]
async fn reassembly_is_byte_stable() {
    let articles = payload::parse_export(export_fixture()).unwrap();

    let first = ArticleAssembler::new(None)
        .assemble(&articles[0])
        .await
        .unwrap();
    let second = ArticleAssembler::new(None)
        .assemble(&articles[0])
        .await
        .unwrap();

    assert_eq!(first, second);
}
