//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Collection behavior settings
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Section name to source section id mappings
    #[serde(default = "defaults::sections")]
    pub sections: Vec<SectionMapping>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(AppError::validation("api.endpoint is empty"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        if self.collection.data_dir.as_os_str().is_empty() {
            return Err(AppError::validation("collection.data_dir is empty"));
        }
        if self.sections.is_empty() {
            return Err(AppError::validation("No sections defined"));
        }

        let mut names = HashSet::new();
        for section in &self.sections {
            if section.name.trim().is_empty() {
                return Err(AppError::validation("Section with empty name"));
            }
            if section.source_id.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Section {} has an empty source_id",
                    section.name
                )));
            }
            if !names.insert(section.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate section name: {}",
                    section.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            collection: CollectionConfig::default(),
            sections: defaults::sections(),
        }
    }
}

/// Content API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the content API
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Articles requested per result page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Delay between page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Collection behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Maximum number of newly stored articles per section per run
    #[serde(default = "defaults::articles_per_section")]
    pub articles_per_section: usize,

    /// Root directory for the stored corpus
    #[serde(default = "defaults::data_dir")]
    pub data_dir: PathBuf,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            articles_per_section: defaults::articles_per_section(),
            data_dir: defaults::data_dir(),
        }
    }
}

/// Mapping from a corpus section name to the source's section id.
///
/// The name doubles as the storage directory and the classification label;
/// the source id is what the content API is queried with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionMapping {
    /// Corpus-side section name (storage directory, label)
    pub name: String,

    /// Source-internal section identifier
    pub source_id: String,
}

mod defaults {
    use std::path::PathBuf;

    use super::SectionMapping;

    // API defaults
    pub fn endpoint() -> String {
        "https://content.guardianapis.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; newsharvest/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> usize {
        50
    }
    pub fn request_delay() -> u64 {
        200
    }

    // Collection defaults
    pub fn articles_per_section() -> usize {
        1000
    }
    pub fn data_dir() -> PathBuf {
        PathBuf::from("data")
    }

    // Section defaults
    pub fn sections() -> Vec<SectionMapping> {
        vec![
            SectionMapping {
                name: "news".to_string(),
                source_id: "news".to_string(),
            },
            SectionMapping {
                name: "sport".to_string(),
                source_id: "sport".to_string(),
            },
            SectionMapping {
                name: "opinion".to_string(),
                source_id: "commentisfree".to_string(),
            },
            SectionMapping {
                name: "culture".to_string(),
                source_id: "culture".to_string(),
            },
        ]
    }
}
