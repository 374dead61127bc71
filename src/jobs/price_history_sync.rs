use async_trait::async_trait;
use chrono::{DateTime, Datelike, Local};

use crate::error::{IngestError, Result};
use crate::models::price::{PricePoint, TimeseriesResponse};
use crate::services::item_store::ItemStore;
use crate::services::wiki_client::WikiClient;

/// Anything that can hand out a daily price series for an item.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    async fn fetch_timeseries(&self, item_id: i32) -> Result<TimeseriesResponse>;
}

#[async_trait]
impl PriceHistorySource for WikiClient {
    async fn fetch_timeseries(&self, item_id: i32) -> Result<TimeseriesResponse> {
        WikiClient::fetch_timeseries(self, item_id).await
    }
}

/// Stage 2: price series for every catalog item -> `item_prices`.
pub async fn sync_food_prices(client: &WikiClient, store: &ItemStore) -> Result<u64> {
    tracing::info!("Starting food price history sync");

    let item_ids = store.fetch_known_item_ids().await?;
    if item_ids.is_empty() {
        tracing::info!("No items in the catalog, skipping price history sync");
        return Ok(0);
    }

    let points = collect_price_history(client, &item_ids).await?;
    let inserted = store.append_prices(&points).await?;

    tracing::info!(
        "Food price history sync complete: {} items, {} points fetched, {} new",
        item_ids.len(),
        points.len(),
        inserted
    );
    Ok(inserted)
}

/// Fetch every id in order and concatenate the flattened series.
///
/// The first failing id aborts the whole collection; nothing gathered so
/// far is returned.
pub async fn collect_price_history<S>(source: &S, item_ids: &[i32]) -> Result<Vec<PricePoint>>
where
    S: PriceHistorySource + ?Sized,
{
    let total = item_ids.len();
    let mut points = Vec::new();

    for (index, &item_id) in item_ids.iter().enumerate() {
        let series = source.fetch_timeseries(item_id).await?;
        if let Some(returned) = series.item_id.filter(|&returned| returned != item_id) {
            return Err(IngestError::MismatchedSeries {
                requested: item_id,
                returned,
            });
        }

        let item_points = flatten_timeseries(item_id, &series)?;

        tracing::debug!(
            "[{}/{}] Item {}: {} daily points",
            index + 1,
            total,
            item_id,
            item_points.len()
        );

        points.extend(item_points);
    }

    Ok(points)
}

/// One [`PricePoint`] per series entry, in the order the API sent them.
pub fn flatten_timeseries(item_id: i32, series: &TimeseriesResponse) -> Result<Vec<PricePoint>> {
    series
        .data
        .iter()
        .map(|point| -> Result<PricePoint> {
            Ok(PricePoint {
                item_id,
                date: format_local_date(point.timestamp)?,
                price: point.avg_high_price,
            })
        })
        .collect()
}

/// Unix seconds -> local calendar day without zero padding ("2024-3-7").
///
/// Existing rows were written in this exact shape, so it must not change.
pub fn format_local_date(timestamp: i64) -> Result<String> {
    let date = DateTime::from_timestamp(timestamp, 0)
        .ok_or(IngestError::InvalidTimestamp(timestamp))?
        .with_timezone(&Local)
        .date_naive();

    Ok(format!("{}-{}-{}", date.year(), date.month(), date.day()))
}
