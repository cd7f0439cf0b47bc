// src/services/mod.rs

//! Content-source services.

mod content;

pub use content::{ContentClient, PagedArticle, SectionPager};
