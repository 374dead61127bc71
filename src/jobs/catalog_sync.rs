use crate::error::Result;
use crate::models::catalog::{CatalogEntry, MappingEntry};
use crate::scrapers::food_table::parse_food_table;
use crate::scrapers::name_resolver::{reconcile, NameMappingIndex};
use crate::services::item_store::ItemStore;
use crate::services::wiki_client::WikiClient;

/// Stage 1: food table -> resolved catalog -> `items`.
pub async fn sync_food_catalog(
    client: &WikiClient,
    store: &ItemStore,
) -> Result<u64> {
    tracing::info!("Starting food catalog sync");

    let wikitext = client.fetch_food_table().await?;
    let mapping = client.fetch_mapping().await?;

    let entries = build_catalog(&wikitext, &mapping)?;
    let written = store.upsert_catalog(&entries).await?;

    tracing::info!("Food catalog sync complete: {} rows written", written);
    Ok(written)
}

/// Parse the table and resolve every tradeable row against the mapping.
pub fn build_catalog(wikitext: &str, mapping: &[MappingEntry]) -> Result<Vec<CatalogEntry>> {
    let table = parse_food_table(wikitext)?;
    tracing::info!(
        "Scanned {} food table rows, {} tradeable",
        table.rows_scanned,
        table.candidates.len()
    );

    let index = NameMappingIndex::from_mapping(mapping);
    tracing::debug!("Mapping index holds {} names", index.len());

    reconcile(table.candidates, &index)
}
