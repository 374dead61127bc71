// src/lib.rs

pub mod entities {
    pub mod prelude;
    pub mod items;
    pub mod item_prices;
}

pub mod services {
    pub mod wiki_client;
    pub mod item_store;
}

pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod scrapers;

pub use error::{IngestError, Result};
