use clap::{Parser, Subcommand};
use nc_scrapers::{handle_command, HttpFetcher, IngestionDriver, ScraperCommands, ScraperManager};
use nc_storage::{BackendConfig, RelatedArticleResolver, Resolution, StorageKind};
use nc_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Duration written as number/unit pairs, e.g. `30s`, `1m`, `1m30s`.
/// A bare number is taken as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Duration must not be empty".to_string());
        }

        let mut total = 0u64;
        let mut digits = String::new();
        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let factor = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("Missing number before '{}'", c))?;
            total = value
                .checked_mul(factor)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(|| format!("Duration is too large: {}", s))?;
            digits.clear();
        }
        if !digits.is_empty() {
            let secs = digits
                .parse::<u64>()
                .map_err(|e| format!("Invalid number in duration: {}", e))?;
            total = total
                .checked_add(secs)
                .ok_or_else(|| format!("Duration is too large: {}", s))?;
        }

        if total == 0 {
            return Err("Duration must be positive".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "newscmp", author, version, about, long_about = None)]
struct Cli {
    /// Article index backend: elasticsearch or memory
    #[arg(long, global = true, default_value = "elasticsearch")]
    storage: StorageKind,

    /// Search backend base URL (defaults to ELASTICSEARCH_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Index holding the articles (defaults to ELASTICSEARCH_INDEX)
    #[arg(long, global = true)]
    index: Option<String>,

    /// Bound on every page fetch and backend call, e.g. 30s or 1m
    #[arg(long, global = true)]
    timeout: Option<HumanDuration>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::from_env();
        if let Some(url) = &self.backend_url {
            config = config.with_url(url);
        }
        if let Some(index) = &self.index {
            config = config.with_index(index);
        }
        if let Some(HumanDuration(timeout)) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Scraper(ScraperCommands),
    /// Print the address of the indexed article most related to ADDRESS
    Related { address: String },
    /// Serve the related-article HTTP API
    Serve {
        #[arg(long, env = "NC_BIND", default_value = "127.0.0.1:50506")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = cli.backend_config();
    let index = nc_storage::create_index(cli.storage, &config)?;
    info!(backend = index.name(), url = %config.url, index = %config.index, "🏦 Article index ready");

    match cli.command {
        Commands::Scraper(command) => {
            let fetcher = Arc::new(HttpFetcher::new(config.timeout)?);
            let manager = ScraperManager::with_default_scrapers(fetcher);
            let driver = IngestionDriver::new(index);
            handle_command(command, manager, &driver).await?;
        }
        Commands::Related { address } => {
            let resolver = RelatedArticleResolver::new(index);
            match resolver.resolve(&address).await? {
                Resolution::Related(related) => println!("{}", related),
                Resolution::UnknownArticle => println!("Article is not indexed: {}", address),
                Resolution::NoRelatedArticle => println!("No related article found for {}", address),
            }
        }
        Commands::Serve { bind } => {
            let state = AppState {
                resolver: RelatedArticleResolver::new(index),
            };
            nc_web::serve(bind, state).await?;
        }
    }

    Ok(())
}
