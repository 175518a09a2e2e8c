// src/formatting/mod.rs
//! Pure rendering of the rich-text content tree to Markdown. No I/O.

mod document;
mod marks;

pub use document::{render_document, render_node};
pub use marks::apply_marks;
