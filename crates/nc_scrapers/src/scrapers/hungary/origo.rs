use encoding_rs::Encoding;
use nc_core::{Article, Result};
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use super::REGION;
use crate::scrapers::utils::{self, DetailLayout};
use crate::scrapers::{Scraper, SourceMetadata};

#[derive(Debug, Clone, Default)]
pub struct OrigoScraper;

impl OrigoScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "http://www.origo.hu/itthon/index.html";

    const EXCLUDED_SEGMENT: &'static str = "/galeria/";

    const DETAIL_LAYOUT: DetailLayout<'static> = DetailLayout {
        lead: Some("#article-lead"),
        body: "#article-text",
        excluded_class: None,
    };
}

impl Scraper for OrigoScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Origo.hu",
            emoji: "🗞️",
            region: REGION,
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h == "origo.hu" || h.ends_with(".origo.hu")))
            .unwrap_or(false)
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["origo"]
    }

    fn listing_url(&self) -> &str {
        Self::BASE_URL
    }

    fn encoding(&self) -> &'static Encoding {
        encoding_rs::ISO_8859_2
    }

    fn parse_listing(&self, html: &str, base: &Url) -> Result<Vec<Article>> {
        let document = Html::parse_document(html);
        let candidate_selector = utils::selector(".news-item")?;
        let title_selector = utils::selector("a.news-title")?;
        let lead_selector = utils::selector("p.news-lead")?;

        let mut articles = Vec::new();
        for node in document.select(&candidate_selector) {
            let Some(title) = node.select(&title_selector).next() else {
                warn!(source = "Origo.hu", "Teaser without title link");
                continue;
            };
            let Some(address) = title
                .value()
                .attr("href")
                .and_then(|href| utils::resolve_address(base, href))
            else {
                warn!(source = "Origo.hu", "Teaser title without address");
                continue;
            };

            if address.contains(Self::EXCLUDED_SEGMENT) {
                debug!(source = "Origo.hu", %address, "Skipping gallery");
                continue;
            }

            let Some(lead) = node.select(&lead_selector).next() else {
                warn!(source = "Origo.hu", %address, "Teaser without lead");
                continue;
            };

            articles.push(Article::new(
                address,
                utils::element_text(&title),
                utils::element_text(&lead),
            ));
        }

        Ok(articles)
    }

    fn parse_article_text(&self, html: &str, address: &str) -> Result<Option<String>> {
        let document = Html::parse_document(html);
        utils::article_text(&document, &Self::DETAIL_LAYOUT, address).map(Some)
    }
}
