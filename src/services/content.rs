// src/services/content.rs

//! Content API client and section pager.
//!
//! Fetches one section's articles page by page from a Guardian-style
//! search endpoint, newest first, with full field and tag expansion.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, Stream};

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Article, SearchResponse};

/// Client for a Guardian-style content API.
pub struct ContentClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    page_size: usize,
    delay: Duration,
}

impl ContentClient {
    /// Create a configured client holding the API credential.
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            page_size: config.page_size,
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Fetch a single result page for a section.
    ///
    /// A present-but-empty or absent `results` array is an empty page,
    /// not an error.
    pub async fn fetch_page(&self, section_id: &str, page: usize) -> Result<Vec<Article>> {
        let url = format!("{}/search", self.endpoint);
        let query = [
            ("section", section_id.to_string()),
            ("page", page.to_string()),
            ("page-size", self.page_size.to_string()),
            ("order-by", "newest".to_string()),
            ("show-fields", "all".to_string()),
            ("show-tags", "all".to_string()),
            ("api-key", self.api_key.clone()),
        ];

        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(AppError::api(
                section_id,
                format!("status {} on page {}", response.status(), page),
            ));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.response.results)
    }

    /// Start a pager over a section, beginning at page 1.
    pub fn pages(&self, section_id: &str) -> SectionPager<'_> {
        SectionPager {
            client: self,
            section_id: section_id.to_string(),
            page: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }
}

/// An article together with the result page it was fetched from.
#[derive(Debug, Clone)]
pub struct PagedArticle {
    pub page: usize,
    pub article: Article,
}

/// Lazy page-by-page producer of one section's articles.
///
/// The sequence ends at the first empty page (source exhausted) or when
/// the pager is dropped; pagination state is not restartable. The
/// configured delay runs before every fetch after the first, so a caller
/// that stops drawing never pays a trailing wait.
pub struct SectionPager<'a> {
    client: &'a ContentClient,
    section_id: String,
    /// Last fetched page number, 0 before the first fetch
    page: usize,
    buffer: VecDeque<Article>,
    exhausted: bool,
}

impl<'a> SectionPager<'a> {
    /// Pull the next article, fetching the next page once the current one
    /// is drained. Returns `None` once the source is exhausted. Transport
    /// failures propagate.
    pub async fn next_article(&mut self) -> Result<Option<PagedArticle>> {
        while self.buffer.is_empty() && !self.exhausted {
            if self.page > 0 {
                tokio::time::sleep(self.client.delay).await;
            }
            self.page += 1;

            let results = self
                .client
                .fetch_page(&self.section_id, self.page)
                .await?;
            if results.is_empty() {
                log::debug!(
                    "No results for section {} on page {}",
                    self.section_id,
                    self.page
                );
                self.exhausted = true;
            } else {
                self.buffer.extend(results);
            }
        }

        Ok(self.buffer.pop_front().map(|article| PagedArticle {
            page: self.page,
            article,
        }))
    }

    /// Adapt the pager into a stream of articles.
    pub fn into_stream(self) -> impl Stream<Item = Result<PagedArticle>> + 'a {
        stream::try_unfold(self, |mut pager| async move {
            let next = pager.next_article().await?;
            Ok::<_, AppError>(next.map(|article| (article, pager)))
        })
    }
}
