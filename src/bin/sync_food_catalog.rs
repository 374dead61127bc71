//! Stage 1: refresh the `items` catalog from the wiki food table.

use dotenvy::dotenv;
use food_prices::config::DatabaseConfig;
use food_prices::jobs::catalog_sync::sync_food_catalog;
use food_prices::services::item_store::ItemStore;
use food_prices::services::wiki_client::WikiClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

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
    dotenv().ok();

    let config = DatabaseConfig::from_env()?;
    let store = ItemStore::connect(&config).await?;
    store.migrate().await?;

    let client = WikiClient::with_default_endpoints()?;

    let rows = sync_food_catalog(&client, &store).await?;
    tracing::info!("Done: {} rows written", rows);

    Ok(())
}
