// src/formatting/marks.rs
//! Mark application for text nodes.
//!
//! Marks wrap the text in listed order, with one pinned exception: a link
//! mark is always applied outermost, so that every other mark styles the
//! visible text *inside* `[...]()`. `[bold, link(x)]` on `"t"` therefore
//! renders `[**t**](x)` no matter where the link sits in the mark list.

use crate::model::TextMark;

/// Applies an ordered sequence of marks to a text run.
pub fn apply_marks(text: &str, marks: &[TextMark]) -> String {
    let mut result = text.to_string();
    let mut link: Option<&str> = None;

    for mark in marks {
        match mark {
            TextMark::Bold => result = format!("**{}**", result),
            TextMark::Italic => result = format!("*{}*", result),
            TextMark::Code => result = format!("`{}`", result),
            TextMark::Strike => result = format!("~~{}~~", result),
            TextMark::Link { href } => link = Some(href.as_str()),
            TextMark::Unknown => {}
        }
    }

    if let Some(href) = link {
        result = format!("[{}]({})", result, href);
    }

    result
}
