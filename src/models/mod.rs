// src/models/mod.rs

//! Domain models for the collector application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod article;
mod config;

// Re-export all public types
pub use article::{Article, ArticleFields, SearchBody, SearchResponse, Tag};
pub use config::{ApiConfig, CollectionConfig, Config, SectionMapping};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of a collection run across all configured sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectOutcome {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub sections: Vec<SectionResult>,
}

impl CollectOutcome {
    /// Total number of records written across all sections.
    pub fn total_written(&self) -> usize {
        self.sections.iter().map(|s| s.written).sum()
    }

    /// Number of sections that failed to complete.
    pub fn failed_sections(&self) -> usize {
        self.sections.iter().filter(|s| s.failed).count()
    }
}

/// Per-section result of a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionResult {
    pub name: String,
    pub source_id: String,
    /// Records newly written by this run
    pub written: usize,
    /// Whether collection aborted on an error for this section
    pub failed: bool,
}
