// src/model/mod.rs
//! Domain model: the article record and its rich-text content tree.

mod article;
mod node;

pub use article::{Article, ArticleBody};
pub use node::{ContentNode, TextMark};
