// src/images/rewrite.rs
//! Post-render image rewrite pass.
//!
//! Scans the rendered Markdown string — not the tree — for references to the
//! recognized storage host, so images are caught regardless of which node
//! kinds happened to carry them. Handles both Markdown image syntax and
//! literal HTML `<img src=…>` occurrences (normalizing HTML entities within
//! each matched URL), then upgrades Markdown links pointing at image files
//! into embedded images.

use super::resolver::ImageResolver;
use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown link whose target ends in an image extension. The optional
/// leading `!` is captured so already-embedded images are left alone.
static IMAGE_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[([^\]]*)\]\(([^)\s]+\.(?i:png|jpe?g|gif|webp|svg))\)")
        .expect("image link regex is valid")
});

/// Replaces every reference to the resolver's host with its resolved local
/// path, then turns image-file links into embedded images.
pub async fn rewrite_images(rendered: &str, resolver: &mut ImageResolver) -> String {
    let mut spans = host_url_spans(rendered, resolver.host());
    // Longest first: a bare URL must never rewrite the prefix of a longer
    // signed variant that shares it.
    spans.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut text = rendered.to_string();
    for span in spans {
        let url = normalize_entities(&span);
        let resolved = resolver.resolve(&url).await;
        if resolved != url {
            text = text.replace(&span, &resolved);
        }
    }

    upgrade_image_links(&text)
}

/// Distinct host-URL spans exactly as they appear in the text, HTML entities
/// included.
fn host_url_spans(text: &str, host: &str) -> Vec<String> {
    // Boundaries stop at whitespace, quotes, brackets and angle brackets so a
    // URL inside `![](…)`, `href="…"` or `<img src=…>` never over-matches.
    let pattern = format!(r#"https?://{}/[^\s"'<>\)\]]+"#, regex::escape(host));
    let re = Regex::new(&pattern).expect("host pattern is valid");

    let mut seen = std::collections::HashSet::new();
    let mut spans = Vec::new();
    for m in re.find_iter(text) {
        if seen.insert(m.as_str().to_string()) {
            spans.push(m.as_str().to_string());
        }
    }
    spans
}

/// Normalizes the HTML entities that show up inside embedded `<img>` markup.
/// Applied per matched span only; the surrounding document keeps its entities.
fn normalize_entities(span: &str) -> String {
    span.replace("&amp;", "&").replace("&#38;", "&")
}

/// A link whose target is an image file becomes an embedded image.
fn upgrade_image_links(text: &str) -> String {
    IMAGE_LINK_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if &caps[1] == "!" {
                caps[0].to_string()
            } else {
                format!("![{}]({})", &caps[2], &caps[3])
            }
        })
        .into_owned()
}
