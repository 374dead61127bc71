//! Persistence for the catalog and the price history.
//!
//! Catalog rows are reference data and get overwritten on conflict; price
//! rows are history and are never touched once written.

use migration::Migrator;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    Database, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use crate::config::DatabaseConfig;
use crate::entities::{item_prices, items, prelude::*};
use crate::error::Result;
use crate::models::catalog::CatalogEntry;
use crate::models::price::PricePoint;

/// Rows per INSERT statement. Keeps prices (3 binds per row) well below the
/// Postgres limit of 65535 bind parameters.
const INSERT_CHUNK_ROWS: usize = 1000;

#[derive(Clone)]
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::connect_url(&config.connection_url()?).await
    }

    pub async fn connect_url(database_url: &str) -> Result<Self> {
        tracing::info!("Connecting to database...");
        let db = Database::connect(database_url).await?;
        Ok(Self::new(db))
    }

    /// Create `items` and `item_prices` if they do not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running migrations...");
        Migrator::up(&self.db, None).await?;
        Ok(())
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert or update catalog rows keyed by `item_id`.
    ///
    /// Entries must not repeat an `item_id` (see
    /// [`reconcile`](crate::scrapers::name_resolver::reconcile)). All chunks
    /// commit together or not at all.
    pub async fn upsert_catalog(&self, entries: &[CatalogEntry]) -> Result<u64> {
        if entries.is_empty() {
            tracing::debug!("Empty catalog batch, nothing to write");
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut written = 0;

        for chunk in entries.chunks(INSERT_CHUNK_ROWS) {
            let models = chunk.iter().map(|entry| items::ActiveModel {
                item_id: Set(entry.item_id),
                item_name: Set(entry.name.clone()),
                heal_amount: Set(entry.heal_amount),
            });

            written += Items::insert_many(models)
                .on_conflict(
                    OnConflict::column(items::Column::ItemId)
                        .update_columns([items::Column::ItemName, items::Column::HealAmount])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!("Upserted {} catalog rows", written);
        Ok(written)
    }

    /// Append price points; rows already stored for `(item_id, date)` are
    /// left as they are. Returns the number of new rows.
    pub async fn append_prices(&self, points: &[PricePoint]) -> Result<u64> {
        if points.is_empty() {
            tracing::debug!("Empty price batch, nothing to write");
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut inserted = 0;

        for chunk in points.chunks(INSERT_CHUNK_ROWS) {
            let models = chunk.iter().map(|point| item_prices::ActiveModel {
                item_id: Set(point.item_id),
                date: Set(point.date.clone()),
                price: Set(point.price),
            });

            inserted += ItemPrices::insert_many(models)
                .on_conflict(
                    OnConflict::columns([item_prices::Column::ItemId, item_prices::Column::Date])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Appended {} new price rows ({} already stored)",
            inserted,
            (points.len() as u64).saturating_sub(inserted)
        );
        Ok(inserted)
    }

    /// Every item id in the catalog, ascending.
    pub async fn fetch_known_item_ids(&self) -> Result<Vec<i32>> {
        let ids = Items::find()
            .select_only()
            .column(items::Column::ItemId)
            .order_by_asc(items::Column::ItemId)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }
}
