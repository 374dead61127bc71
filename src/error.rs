use thiserror::Error;

/// Every failure aborts the run; nothing here is recovered locally.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("wiki page '{0}' has no revision content")]
    MissingPage(String),

    #[error("food table row {row}: {reason}")]
    Parse { row: usize, reason: String },

    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("asked for the price series of item {requested}, got item {returned}")]
    MismatchedSeries { requested: i32, returned: i32 },

    #[error("no mapping entry matches item name '{name}'")]
    Unresolved { name: String },

    #[error("database error: {0}")]
    Store(#[from] sea_orm::DbErr),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
