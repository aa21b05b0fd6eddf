use nc_core::{Article, Result};
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use super::REGION;
use crate::scrapers::utils::{self, DetailLayout};
use crate::scrapers::{Scraper, SourceMetadata};

#[derive(Debug, Clone, Default)]
pub struct IndexScraper;

impl IndexScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://index.hu/belfold/";

    /// "Mindeközben" posts are short live-blog entries, not articles.
    const EXCLUDED_SEGMENT: &'static str = "/mindekozben/";

    /// Status badges of live coverage pages: (class, text).
    const LIVE_MARKERS: [(&'static str, &'static str); 2] = [("elo", "Élő"), ("vege", "Vége")];

    const DETAIL_LAYOUT: DetailLayout<'static> = DetailLayout {
        lead: Some(".lead"),
        body: ".cikk-torzs",
        // "Nincs másik" donation campaign embedded in the body
        excluded_class: Some("nm_widget"),
    };

    fn is_excluded(address: &str) -> bool {
        address.contains(Self::EXCLUDED_SEGMENT)
    }

    fn is_live_page(document: &Html) -> Result<bool> {
        let badge = utils::selector("div.allapot")?;
        Ok(document.select(&badge).any(|node| {
            let text = utils::element_text(&node);
            Self::LIVE_MARKERS.iter().any(|(class, marker)| {
                node.value().classes().any(|c| c == *class) && text == *marker
            })
        }))
    }
}

impl Scraper for IndexScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Index.hu",
            emoji: "📰",
            region: REGION,
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h == "index.hu" || h.ends_with(".index.hu")))
            .unwrap_or(false)
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["index"]
    }

    fn listing_url(&self) -> &str {
        Self::BASE_URL
    }

    fn parse_listing(&self, html: &str, base: &Url) -> Result<Vec<Article>> {
        let document = Html::parse_document(html);
        let candidate_selector = utils::selector(".rovatajanlo")?;
        // the leading teaser ("vezeto") links its headline directly
        let headline_selector = utils::selector("h1 a")?;
        let title_selector = utils::selector("h1 .cim")?;
        let lead_selector = utils::selector(".ajanlo")?;

        let mut articles = Vec::new();
        for node in document.select(&candidate_selector) {
            let is_headline = utils::has_class_containing(&node, "vezeto");
            let title_node = if is_headline {
                node.select(&headline_selector).next()
            } else {
                node.select(&title_selector).next()
            };
            let Some(title_node) = title_node else {
                warn!(source = "Index.hu", headline = is_headline, "Teaser without title node");
                continue;
            };

            let Some(address) = title_node
                .value()
                .attr("href")
                .and_then(|href| utils::resolve_address(base, href))
            else {
                warn!(source = "Index.hu", "Teaser title without address");
                continue;
            };

            if Self::is_excluded(&address) {
                debug!(source = "Index.hu", %address, "Skipping live-blog post");
                continue;
            }

            let Some(lead) = node.select(&lead_selector).next() else {
                warn!(source = "Index.hu", %address, "Teaser without lead");
                continue;
            };

            articles.push(Article::new(
                address,
                utils::element_text(&title_node),
                utils::element_text(&lead),
            ));
        }

        Ok(articles)
    }

    fn parse_article_text(&self, html: &str, address: &str) -> Result<Option<String>> {
        let document = Html::parse_document(html);
        if Self::is_live_page(&document)? {
            return Ok(None);
        }
        utils::article_text(&document, &Self::DETAIL_LAYOUT, address).map(Some)
    }
}
