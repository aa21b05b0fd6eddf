use super::{Region, Scraper};

pub mod hirado;
pub mod index;
pub mod origo;

pub use hirado::HiradoScraper;
pub use index::IndexScraper;
pub use origo::OrigoScraper;

pub const REGION: Region = Region {
    name: "Hungary",
    emoji: "🇭🇺",
};

/// Returns all Hungarian portal scrapers in harvest order
pub fn get_scrapers() -> Vec<Box<dyn Scraper>> {
    vec![
        Box::new(IndexScraper::new()),
        Box::new(HiradoScraper::new()),
        Box::new(OrigoScraper::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scrapers() {
        let scrapers = get_scrapers();
        assert_eq!(scrapers.len(), 3);

        let names: Vec<_> = scrapers.iter().map(|s| s.source_metadata().name).collect();
        assert_eq!(names, vec!["Index.hu", "Hirado.hu", "Origo.hu"]);

        assert!(scrapers.iter().any(|s| s.can_handle("https://index.hu/belfold/cikk/")));
        assert!(scrapers.iter().any(|s| s.can_handle("https://www.hirado.hu/belfold/cikk/")));
        assert!(scrapers.iter().any(|s| s.can_handle("http://www.origo.hu/itthon/cikk.html")));
    }

    #[test]
    fn test_region() {
        assert!(get_scrapers()
            .iter()
            .all(|s| s.source_metadata().region == REGION));
    }
}
