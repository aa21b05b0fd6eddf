use async_trait::async_trait;
use encoding_rs::Encoding;
use nc_core::{Error, Result};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; newscmp/0.1)";

/// Retrieves raw page markup for the portal scrapers.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and decode its body with `encoding`.
    async fn fetch_page(&self, url: &Url, encoding: &'static Encoding) -> Result<String>;
}

/// Pooled HTTP client shared by every portal of a run.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url, encoding: &'static Encoding) -> Result<String> {
        let unreachable = |reason: String| Error::SourceUnreachable {
            target: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unreachable(format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            debug!(%url, encoding = encoding.name(), "Page contained malformed byte sequences");
        }
        Ok(text.into_owned())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages; anything else is unreachable.
    #[derive(Default)]
    pub struct StaticFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, url: &Url, _encoding: &'static Encoding) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| Error::SourceUnreachable {
                    target: url.to_string(),
                    reason: "HTTP 404 Not Found".to_string(),
                })
        }
    }
}
