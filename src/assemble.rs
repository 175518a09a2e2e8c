// src/assemble.rs
//! Article assembly — composes metadata and the rendered body into one
//! Markdown document per article.
//!
//! The document shape is fixed and reproduced exactly: title, a Basic
//! Information block (carrying the identity marker the sync engine scans
//! for), optional Categories, optional Key Takeaways, optional Article
//! Content. Byte-for-byte stability of this output is what makes the
//! content-based sync classification work.

use crate::constants::IDENTITY_MARKER_PREFIX;
use crate::error::AppError;
use crate::formatting::render_document;
use crate::images::{rewrite_images, ImageResolver};
use crate::model::{Article, ArticleBody};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));
static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex is valid"));

/// Composes articles into Markdown documents, localizing embedded images
/// when a resolver is configured.
pub struct ArticleAssembler {
    resolver: Option<ImageResolver>,
}

impl ArticleAssembler {
    pub fn new(resolver: Option<ImageResolver>) -> Self {
        Self { resolver }
    }

    /// Assembles the complete Markdown document for one article.
    pub async fn assemble(&mut self, article: &Article) -> Result<String, AppError> {
        let mut body = render_body(article);

        if let Some(resolver) = &mut self.resolver {
            if !body.is_empty() {
                body = rewrite_images(&body, resolver).await;
            }
        }

        Ok(compose_document(article, &body))
    }
}

/// Renders the article's content field to Markdown, whichever wire shape
/// it arrived in.
fn render_body(article: &Article) -> String {
    match article.body_content() {
        ArticleBody::Tree(tree) => render_document(&tree),
        ArticleBody::Plain(text) => clean_text(&text),
        ArticleBody::Empty => String::new(),
    }
}

/// Builds the fixed document layout around the rendered body.
fn compose_document(article: &Article, body: &str) -> String {
    let title = if article.title.is_empty() {
        "Untitled"
    } else {
        &article.title
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# {}", title));
    lines.push(String::new());

    lines.push("## Basic Information".to_string());
    lines.push(format!("{}{}", IDENTITY_MARKER_PREFIX, article.id));
    lines.push(format!("- **Author**: {}", format_authors(&article.authors)));
    lines.push(format!("- **Last Edited**: {}", article.display_date()));
    lines.push(String::new());

    let has_categories =
        !article.channels.is_empty() || !article.tags.is_empty() || !article.countries.is_empty();
    if has_categories {
        lines.push("## Categories".to_string());
        if !article.channels.is_empty() {
            lines.push(format!("- **Channels**: {}", article.channels.join(", ")));
        }
        if !article.tags.is_empty() {
            lines.push(format!("- **Tags**: {}", format_tags(&article.tags)));
        }
        if !article.countries.is_empty() {
            lines.push(format!(
                "- **Countries**: {}",
                format_countries(&article.countries)
            ));
        }
        lines.push(String::new());
    }

    let takeaways = clean_text(&article.key_takeaways);
    if !takeaways.is_empty() {
        lines.push("## Key Takeaways".to_string());
        lines.push(takeaways);
        lines.push(String::new());
    }

    if !body.trim().is_empty() {
        lines.push("## Article Content".to_string());
        lines.push(body.to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Collapses whitespace runs, strips HTML tags, trims.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = WHITESPACE_RUN_RE.replace_all(text, " ");
    let stripped = HTML_TAG_RE.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Joins author names the way a byline reads: "A", "A and B",
/// "A, B and C".
pub fn format_authors(authors: &[String]) -> String {
    match authors {
        [] => "Unknown author".to_string(),
        [single] => single.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("`{}`", tag))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_countries(countries: &[String]) -> String {
    countries
        .iter()
        .map(|country| format!("**{}**", country.to_uppercase()))
        .collect::<Vec<_>>()
        .join(" | ")
}
