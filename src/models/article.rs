//! Content API payload models.
//!
//! The search endpoint returns loosely populated objects; every optional
//! field here carries a serde default so a sparse payload still decodes
//! and the codec never has to deal with absent keys.

use serde::Deserialize;

/// One article as returned by the content API search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    /// Source-assigned identifier, unique within the source
    pub id: String,

    /// Source-internal section code (e.g. "commentisfree")
    pub section_id: String,

    /// Human-readable section name
    pub section_name: String,

    /// Title as displayed on the source website
    pub web_title: String,

    /// Full URL of the article
    pub web_url: String,

    /// Expanded field block (requires show-fields)
    pub fields: ArticleFields,

    /// Expanded tag list (requires show-tags)
    pub tags: Vec<Tag>,
}

impl Article {
    /// First tag of the article, treated as its dominant topical classifier.
    pub fn primary_tag(&self) -> Option<&Tag> {
        self.tags.first()
    }
}

/// Expanded per-article fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArticleFields {
    pub headline: String,
    pub trail_text: String,
    pub byline: String,
    pub body_text: String,
}

/// One tag attached to an article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub tag_type: String,
}

/// Envelope around a search result page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub response: SearchBody,
}

/// Body of a search result page. A missing `results` array is an empty page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchBody {
    pub results: Vec<Article>,
}
