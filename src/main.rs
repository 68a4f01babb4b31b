use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use pricewatch::config::{self, AppConfig};
use pricewatch::fetch::Fetcher;
use pricewatch::history::HistorySink;
use pricewatch::models::CheckStatus;
use pricewatch::notify::EmailNotifier;
use pricewatch::pipeline::PriceChecker;

#[derive(Parser, Debug)]
#[command(name = "pricewatch", version, about = "Checks tracked product pages and emails when a price meets its target")]
struct Args {
    /// Path to the tracked products file
    #[arg(long, default_value = "products.json")]
    products: PathBuf,

    /// Path to the CSV price history
    #[arg(long, default_value = "price_history.csv")]
    history: PathBuf,

    /// Skip the randomized anti-fingerprint delay between requests
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pricewatch=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    config.products_path = args.products;
    config.history_path = args.history;
    if args.no_delay {
        config.fetcher = config.fetcher.without_delay();
    }

    info!("starting price check run");
    run(&config).await;
    info!("run finished");

    // All failure modes were reported above; the process exits zero.
    Ok(())
}

async fn run(config: &AppConfig) {
    let products = match config::load_products(&config.products_path) {
        Ok(products) => products,
        Err(e) => {
            error!("failed to load products: {}", e);
            return;
        }
    };
    info!("loaded {} products", products.len());

    let fetcher = match Fetcher::new(config.fetcher.clone()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("failed to build HTTP client: {}", e);
            return;
        }
    };

    let checker = PriceChecker::new(fetcher, config.candidates.clone())
        .with_debug_dump(&config.debug_dump_path);
    let history = HistorySink::new(&config.history_path);
    let notifier = EmailNotifier::new(config.smtp.clone());

    // One product at a time; a failed check never aborts the others.
    for product in &products {
        info!("checking {}", product.name);
        let reading = checker.check(product).await;

        match (reading.status, reading.numeric_price) {
            (CheckStatus::Success, Some(price)) => {
                info!(
                    "{}: current ₹{} | target ₹{}",
                    product.name, price, product.target_price
                );

                if let Err(e) = history.append(&product.name, price, reading.timestamp) {
                    error!("{}: failed to record history: {}", product.name, e);
                }

                if product.meets_target(price) {
                    info!("{}: target met, sending alert", product.name);
                    notifier.notify(&product.name, price, &product.url);
                } else {
                    info!("{}: price still above target", product.name);
                }
            }
            (status, _) => {
                warn!("{}: could not retrieve price ({})", product.name, status);
            }
        }
    }
}
