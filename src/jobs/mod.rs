pub mod catalog_sync;
pub mod price_history_sync;
