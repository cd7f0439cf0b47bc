// src/pipeline/collect.rs

//! Section collection pipeline.
//!
//! Drives the pager over each configured section and persists every new
//! article until the per-section quota of newly written records is filled
//! or the source runs out of pages.

use chrono::Utc;
use futures::{StreamExt, pin_mut};

use crate::codec;
use crate::error::Result;
use crate::models::{CollectOutcome, Config, SectionMapping, SectionResult};
use crate::services::ContentClient;
use crate::storage::LocalStorage;

/// Collect up to `quota` new records for one section.
///
/// Every article of every fetched page is considered. An id already in
/// storage is skipped without consuming quota, so a re-run resumes where
/// the last one stopped. Returns the number of records written by this
/// invocation.
pub async fn collect_section(
    client: &ContentClient,
    storage: &LocalStorage,
    section: &SectionMapping,
    quota: usize,
) -> Result<usize> {
    log::info!(
        "Collecting section {} (source id: {})",
        section.name,
        section.source_id
    );
    storage.ensure_section(&section.name).await?;

    let articles = client.pages(&section.source_id).into_stream();
    pin_mut!(articles);

    let mut written = 0;
    while written < quota {
        let Some(next) = articles.next().await else {
            log::info!(
                "Source exhausted for {} with {} of {} records",
                section.name,
                written,
                quota
            );
            break;
        };
        let paged = next?;

        let sanitized = codec::sanitize_id(&paged.article.id);
        let key = if sanitized.is_empty() {
            // source sent no id, synthesize a stable fallback key
            format!("{}_{}_{}", section.name, paged.page, written)
        } else {
            sanitized
        };

        if storage.contains(&section.name, &key).await {
            log::debug!("Skipping already stored record {key}");
            continue;
        }

        let text = codec::encode_article(&paged.article);
        if storage.write_record(&section.name, &key, &text).await? {
            written += 1;
        }
    }

    log::info!("Collected {} articles for {}", written, section.name);
    Ok(written)
}

/// Run collection for every configured section.
///
/// A failing section is logged and does not abort the remaining sections.
/// The resulting summary is also persisted as `stats.json` at the corpus
/// root.
pub async fn run_collector(
    config: &Config,
    storage: &LocalStorage,
    client: &ContentClient,
) -> Result<CollectOutcome> {
    let started_at = Utc::now();
    let quota = config.collection.articles_per_section;

    let mut sections = Vec::new();
    for section in &config.sections {
        let result = match collect_section(client, storage, section, quota).await {
            Ok(written) => SectionResult {
                name: section.name.clone(),
                source_id: section.source_id.clone(),
                written,
                failed: false,
            },
            Err(error) => {
                log::error!("Collection failed for {}: {}", section.name, error);
                SectionResult {
                    name: section.name.clone(),
                    source_id: section.source_id.clone(),
                    written: 0,
                    failed: true,
                }
            }
        };
        sections.push(result);
    }

    let outcome = CollectOutcome {
        started_at,
        finished_at: Utc::now(),
        sections,
    };
    storage.write_stats(&outcome).await?;

    Ok(outcome)
}
