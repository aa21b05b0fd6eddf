use nc_core::{ArticleIndex, Error, Result};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub mod backends;
pub mod query;
pub mod resolver;
pub mod response;

pub use backends::*;
pub use resolver::{RelatedArticleResolver, Resolution};

pub const DEFAULT_URL: &str = "http://localhost:9200/";
pub const DEFAULT_INDEX: &str = "news";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the article index lives and how long a single call may take.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub index: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            index: DEFAULT_INDEX.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConfig {
    /// Reads `ELASTICSEARCH_URL`, `ELASTICSEARCH_INDEX` and
    /// `NC_REQUEST_TIMEOUT` (seconds), falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = match env::var("NC_REQUEST_TIMEOUT") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Ignoring invalid NC_REQUEST_TIMEOUT");
                    defaults.timeout
                }
            },
            Err(_) => defaults.timeout,
        };
        Self {
            url: env::var("ELASTICSEARCH_URL").unwrap_or(defaults.url),
            index: env::var("ELASTICSEARCH_INDEX").unwrap_or(defaults.index),
            timeout,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_index(mut self, index: &str) -> Self {
        self.index = index.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Elasticsearch,
    Memory,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "elasticsearch" | "elastic" | "es" => Ok(Self::Elasticsearch),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

/// Builds the article index selected on the command line.
pub fn create_index(kind: StorageKind, config: &BackendConfig) -> Result<Arc<dyn ArticleIndex>> {
    match kind {
        StorageKind::Elasticsearch => Ok(Arc::new(ElasticsearchIndex::new(config)?)),
        StorageKind::Memory => Ok(Arc::new(InMemoryIndex::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_from_str() {
        assert_eq!("elasticsearch".parse::<StorageKind>().unwrap(), StorageKind::Elasticsearch);
        assert_eq!("ES".parse::<StorageKind>().unwrap(), StorageKind::Elasticsearch);
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert!(matches!("chroma".parse::<StorageKind>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_builders() {
        let config = BackendConfig::default()
            .with_url("http://es:9200")
            .with_index("articles")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.url, "http://es:9200");
        assert_eq!(config.index, "articles");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_create_memory_index() {
        let index = create_index(StorageKind::Memory, &BackendConfig::default()).unwrap();
        assert_eq!(index.name(), "memory");
    }
}
