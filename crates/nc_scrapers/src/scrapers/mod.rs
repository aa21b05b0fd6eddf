use async_trait::async_trait;
use encoding_rs::Encoding;
use nc_core::{Article, Result};
use url::Url;

use crate::fetch::PageFetcher;
use crate::logging::Logger;

pub mod hungary;

pub use hungary::{HiradoScraper, IndexScraper, OrigoScraper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
    pub region: Region,
}

/// One news portal: where its listing lives and how its pages are laid out.
///
/// Scraping runs in two phases. The listing page yields candidates with
/// address, title and lead; each accepted candidate's detail page then
/// supplies the body text.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Returns the name and region of the news source
    fn source_metadata(&self) -> SourceMetadata;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Returns a list of CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }

    /// Page enumerating the article teasers
    fn listing_url(&self) -> &str;

    /// Character encoding the portal serves its pages in
    fn encoding(&self) -> &'static Encoding {
        encoding_rs::UTF_8
    }

    /// Extracts accepted candidates from the listing page, text left empty.
    /// A candidate missing an expected node is skipped, not an error.
    fn parse_listing(&self, html: &str, base: &Url) -> Result<Vec<Article>>;

    /// Assembles the body text of a detail page. `Ok(None)` marks a page
    /// that is not a regular article.
    fn parse_article_text(&self, html: &str, address: &str) -> Result<Option<String>>;

    /// Runs both phases. Only a listing page failure is returned as an error;
    /// articles whose detail page fails are logged and left out.
    async fn get_articles(&self, fetcher: &dyn PageFetcher) -> Result<Vec<Article>> {
        let metadata = self.source_metadata();
        let logger = Logger::new()
            .with_prefix(metadata.region.emoji.to_string())
            .with_prefix(format!("[{}]", metadata.name));
        logger.info("Getting articles via web scraping started");

        let listing_url = utils::parse_url(self.listing_url())?;
        let listing = fetcher.fetch_page(&listing_url, self.encoding()).await?;
        let candidates = self.parse_listing(&listing, &listing_url)?;
        logger.debug(&format!("{} candidates accepted on listing page", candidates.len()));

        let mut articles = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.fetch_article_text(fetcher, &candidate.address).await {
                Ok(Some(text)) => articles.push(candidate.with_text(text)),
                Ok(None) => logger.info(&format!("Skipping non-article page {}", candidate.address)),
                Err(e) => logger.warn(&format!("Skipping {}: {}", candidate.address, e)),
            }
        }

        logger.info(&format!("{} articles successfully retrieved", articles.len()));
        Ok(articles)
    }

    /// Detail phase for one article.
    async fn fetch_article_text(&self, fetcher: &dyn PageFetcher, address: &str) -> Result<Option<String>> {
        let url = utils::parse_url(address)?;
        let html = fetcher.fetch_page(&url, self.encoding()).await?;
        self.parse_article_text(&html, address)
    }
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use nc_core::{Error, Result};
    use scraper::{ElementRef, Html, Selector};
    use url::Url;

    /// Element names kept when assembling body text.
    const BODY_NODES: [&str; 8] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li"];

    /// Where a detail page keeps its lead and body.
    pub struct DetailLayout<'a> {
        pub lead: Option<&'a str>,
        pub body: &'a str,
        /// Class-name substring of widgets whose contents are not article text
        pub excluded_class: Option<&'a str>,
    }

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| Error::Selector(format!("{}: {:?}", selector, e)))
    }

    /// Resolves a possibly relative or protocol-relative href.
    pub fn resolve_address(base: &Url, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        base.join(href).ok().map(String::from)
    }

    /// Trimmed text content. The parser has already resolved character
    /// references, so the result is never decoded again.
    pub fn element_text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    pub fn has_class_containing(element: &ElementRef<'_>, fragment: &str) -> bool {
        element
            .value()
            .attr("class")
            .map_or(false, |class| class.contains(fragment))
    }

    fn is_body_node(element: &ElementRef<'_>) -> bool {
        BODY_NODES.contains(&element.value().name())
    }

    fn push_line(buffer: &mut String, line: &str) {
        if line.is_empty() {
            return;
        }
        buffer.push_str(line);
        buffer.push('\n');
    }

    /// Concatenates paragraph, heading and list-item text below `container`
    /// in document order, one line per node. A node nested in another body
    /// node is already part of its ancestor's line.
    pub fn assemble_body(container: ElementRef<'_>, excluded_class: Option<&str>) -> String {
        let mut text = String::new();
        for node in container.descendants().skip(1).filter_map(ElementRef::wrap) {
            if !is_body_node(&node) {
                continue;
            }
            let mut enclosing = node
                .ancestors()
                .take_while(|a| a.id() != container.id())
                .filter_map(ElementRef::wrap);
            let skipped = enclosing.any(|a| {
                is_body_node(&a) || excluded_class.map_or(false, |fragment| has_class_containing(&a, fragment))
            });
            let excluded = excluded_class.map_or(false, |fragment| has_class_containing(&node, fragment));
            if skipped || excluded {
                continue;
            }
            push_line(&mut text, &element_text(&node));
        }
        text
    }

    /// Lead (when the layout has one and the page carries it) followed by
    /// the assembled body.
    pub fn article_text(document: &Html, layout: &DetailLayout<'_>, address: &str) -> Result<String> {
        let mut text = String::new();

        if let Some(lead) = layout.lead {
            if let Some(node) = document.select(&selector(lead)?).next() {
                push_line(&mut text, &element_text(&node));
            }
        }

        let body = document
            .select(&selector(layout.body)?)
            .next()
            .ok_or_else(|| Error::ExtractionMiss(format!("no '{}' body container on {}", layout.body, address)))?;
        text.push_str(&assemble_body(body, layout.excluded_class));

        Ok(text)
    }
}
