// src/model/article.rs
//! The article record as exported by the topics API.

use super::node::ContentNode;
use chrono::NaiveDate;
use serde::Deserialize;

/// One exported article.
///
/// Identity is the externally provided `id`, stable across runs. It is the key
/// for incremental sync and is never derived from a filename or slug. Every
/// field defaults when absent so a sparse record still converts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub countries: Vec<String>,
    pub channels: Vec<String>,
    #[serde(rename = "last_edited_date")]
    pub last_edited: String,
    pub key_takeaways: String,
    /// Rich-text document. Arrives either as a JSON object or as a JSON string
    /// that itself must be decoded; `body_content` handles both.
    pub content: serde_json::Value,
}

/// How an article's `content` field resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleBody {
    /// A structured content tree to hand to the renderer.
    Tree(ContentNode),
    /// A plain string that was not valid JSON — used verbatim after cleanup.
    Plain(String),
    /// No content at all.
    Empty,
}

impl Article {
    /// Resolves the `content` field into a renderable body.
    pub fn body_content(&self) -> ArticleBody {
        match &self.content {
            serde_json::Value::Null => ArticleBody::Empty,
            serde_json::Value::String(raw) => {
                if raw.trim().is_empty() {
                    return ArticleBody::Empty;
                }
                match serde_json::from_str::<ContentNode>(raw) {
                    Ok(tree) => ArticleBody::Tree(tree),
                    Err(_) => ArticleBody::Plain(raw.clone()),
                }
            }
            other => match ContentNode::deserialize(other.clone()) {
                Ok(tree) => ArticleBody::Tree(tree),
                Err(_) => ArticleBody::Empty,
            },
        }
    }

    /// The date component of the last-edited timestamp, if parseable.
    ///
    /// Timestamps may carry a time-of-day; only the date is significant for
    /// display and filenames.
    pub fn edit_date(&self) -> Option<NaiveDate> {
        let token = self
            .last_edited
            .split(|c| c == 'T' || c == ' ')
            .next()
            .unwrap_or_default();
        NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()
    }

    /// Human-readable edit date: parsed date when possible, the raw string
    /// otherwise, or a placeholder when absent.
    pub fn display_date(&self) -> String {
        if self.last_edited.is_empty() {
            return "Unknown date".to_string();
        }
        match self.edit_date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.last_edited.clone(),
        }
    }
}
