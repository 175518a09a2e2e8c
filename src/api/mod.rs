// src/api/mod.rs
//! Export retrieval: the HTTP client and payload parsing.

mod client;
pub mod payload;

pub use client::ExportHttpClient;
