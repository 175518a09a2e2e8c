// src/images/mod.rs
//! Remote image resolution: key-based caching plus the post-render rewrite
//! pass over the rendered Markdown string.

mod resolver;
mod rewrite;

pub use resolver::{FetchFailure, HttpImageFetcher, ImageFetcher, ImageResolver};
pub use rewrite::rewrite_images;
