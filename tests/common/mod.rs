use food_prices::models::catalog::CatalogEntry;
use food_prices::models::price::PricePoint;
use food_prices::services::item_store::ItemStore;
use sea_orm::{ConnectOptions, Database};

/// Fresh in-memory SQLite database with the schema applied.
/// A single pooled connection, otherwise every connection sees its own
/// empty database.
pub async fn setup_test_store() -> food_prices::Result<ItemStore> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;
    let store = ItemStore::new(db);
    store.migrate().await?;

    Ok(store)
}

#[allow(dead_code)]
pub fn entry(item_id: i32, name: &str, heal_amount: i32) -> CatalogEntry {
    CatalogEntry {
        item_id,
        name: name.to_string(),
        heal_amount,
    }
}

#[allow(dead_code)]
pub fn price(item_id: i32, date: &str, price: Option<i32>) -> PricePoint {
    PricePoint {
        item_id,
        date: date.to_string(),
        price,
    }
}
