use nc_core::{Article, Result};
use scraper::Html;
use tracing::warn;
use url::Url;

use super::REGION;
use crate::scrapers::utils::{self, DetailLayout};
use crate::scrapers::{Scraper, SourceMetadata};

#[derive(Debug, Clone, Default)]
pub struct HiradoScraper;

impl HiradoScraper {
    pub fn new() -> Self {
        Self
    }

    const BASE_URL: &'static str = "https://www.hirado.hu/belfold/";

    const DETAIL_LAYOUT: DetailLayout<'static> = DetailLayout {
        lead: Some(".articleLead"),
        body: ".articleContent",
        excluded_class: None,
    };

    /// Article addresses are stored in their canonical, slash-terminated form.
    fn canonical_address(mut address: String) -> String {
        if !address.ends_with('/') {
            address.push('/');
        }
        address
    }
}

impl Scraper for HiradoScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Hirado.hu",
            emoji: "📺",
            region: REGION,
        }
    }

    fn can_handle(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h == "hirado.hu" || h.ends_with(".hirado.hu")))
            .unwrap_or(false)
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["hirado"]
    }

    fn listing_url(&self) -> &str {
        Self::BASE_URL
    }

    fn parse_listing(&self, html: &str, base: &Url) -> Result<Vec<Article>> {
        let document = Html::parse_document(html);
        let candidate_selector = utils::selector(".listerTxt")?;
        let link_selector = utils::selector("a")?;
        let title_selector = utils::selector("h4")?;
        let lead_selector = utils::selector("div.Txt")?;

        let mut articles = Vec::new();
        for node in document.select(&candidate_selector) {
            let Some(address) = node
                .select(&link_selector)
                .next()
                .and_then(|link| link.value().attr("href"))
                .and_then(|href| utils::resolve_address(base, href))
            else {
                warn!(source = "Hirado.hu", "Teaser without link");
                continue;
            };
            let address = Self::canonical_address(address);

            let Some(title) = node.select(&title_selector).next() else {
                warn!(source = "Hirado.hu", %address, "Teaser without title");
                continue;
            };
            let Some(lead) = node.select(&lead_selector).next() else {
                warn!(source = "Hirado.hu", %address, "Teaser without lead");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const LISTING: &str = r#"
        <div class="lister">
            <div class="listerTxt">
                <a href="//www.hirado.hu/belfold/kozelet/cikk/2019/03/01/elso-hir"><h4>Első hír</h4></a>
                <div class="Txt">Az &quot;első&quot; hír leadje</div>
            </div>
            <div class="listerTxt">
                <a href="/belfold/cikk/2019/03/01/masodik-hir/"><h4>Második hír</h4></a>
                <div class="Txt">Második lead</div>
            </div>
            <div class="listerTxt">
                <h4>Link nélkül</h4>
                <div class="Txt">Nincs cím</div>
            </div>
        </div>
    "#;

    const ARTICLE: &str = r#"
        <html><body>
            <div class="articleHead">
                <p class="articleLead">A hír összefoglalója.</p>
            </div>
            <div class="articleContent">
                <p>Első bekezdés.</p>
                <p>   </p>
                <h3>Részletek</h3>
                <p>Második bekezdés.</p>
            </div>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse(HiradoScraper::BASE_URL).unwrap()
    }

    #[test]
    fn test_can_handle() {
        let scraper = HiradoScraper::new();
        assert!(scraper.can_handle("https://www.hirado.hu/belfold/cikk/"));
        assert!(!scraper.can_handle("https://index.hu/belfold/"));
    }

    #[test]
    fn test_parse_listing_normalizes_addresses() {
        let articles = HiradoScraper::new().parse_listing(LISTING, &base()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].address,
            "https://www.hirado.hu/belfold/kozelet/cikk/2019/03/01/elso-hir/"
        );
        assert_eq!(
            articles[1].address,
            "https://www.hirado.hu/belfold/cikk/2019/03/01/masodik-hir/"
        );
        assert!(articles.iter().all(|a| a.address.ends_with('/')));
    }

    #[test]
    fn test_parse_listing_resolves_entities() {
        let articles = HiradoScraper::new().parse_listing(LISTING, &base()).unwrap();
        assert_eq!(articles[0].title, "Első hír");
        assert_eq!(articles[0].lead, "Az \"első\" hír leadje");
    }

    #[test]
    fn test_parse_article_text() {
        let text = HiradoScraper::new()
            .parse_article_text(ARTICLE, "https://www.hirado.hu/belfold/a/")
            .unwrap();
        assert_eq!(
            text.as_deref(),
            Some("A hír összefoglalója.\nElső bekezdés.\nRészletek\nMásodik bekezdés.\n")
        );
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let result = HiradoScraper::new().parse_article_text("<p>x</p>", "https://www.hirado.hu/a/");
        assert!(matches!(result, Err(nc_core::Error::ExtractionMiss(_))));
    }

    #[tokio::test]
    async fn test_get_articles() {
        let fetcher = StaticFetcher::new()
            .with_page(HiradoScraper::BASE_URL, LISTING)
            .with_page("https://www.hirado.hu/belfold/kozelet/cikk/2019/03/01/elso-hir/", ARTICLE)
            .with_page("https://www.hirado.hu/belfold/cikk/2019/03/01/masodik-hir/", "<html></html>");

        let articles = HiradoScraper::new().get_articles(&fetcher).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Első hír");
        assert!(articles[0].text.contains("Második bekezdés."));
    }
}
