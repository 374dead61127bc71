use food_prices::config::DatabaseConfig;
use food_prices::jobs::{catalog_sync::sync_food_catalog, price_history_sync::sync_food_prices};
use food_prices::services::item_store::ItemStore;
use food_prices::services::wiki_client::WikiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Full pipeline: schema bootstrap, catalog, then price history.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = DatabaseConfig::from_env()?;
    let store = ItemStore::connect(&config).await?;
    store.migrate().await?;

    let client = WikiClient::with_default_endpoints()?;

    let catalog_rows = sync_food_catalog(&client, &store).await?;
    let price_rows = sync_food_prices(&client, &store).await?;

    tracing::info!(
        "=== Pipeline complete: {} catalog rows, {} new price rows ===",
        catalog_rows,
        price_rows
    );

    Ok(())
}
