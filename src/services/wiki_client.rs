use reqwest::header::{HeaderMap, HeaderValue, FROM, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{IngestError, Result};
use crate::models::catalog::MappingEntry;
use crate::models::price::TimeseriesResponse;
use crate::models::wiki::QueryResponse;

pub const WIKI_API_URL: &str = "https://oldschool.runescape.wiki/api.php";
pub const PRICES_API_URL: &str = "https://prices.runescape.wiki/api/v1/osrs";
pub const FOOD_TABLE_TITLE: &str = "Food/All food";
pub const DEFAULT_USER_AGENT: &str = "food-prices/0.1 - healing per gold calculator";
pub const DEFAULT_CONTACT: &str = "food-prices maintainers (healing per gold calculator)";

const BODY_EXCERPT_CHARS: usize = 200;

/// Read-only access to the wiki and its price API.
///
/// Both services ask clients to identify themselves, so every request
/// carries a `User-Agent` and a `From` contact header.
#[derive(Clone)]
pub struct WikiClient {
    client: Client,
    wiki_url: String,
    prices_url: String,
}

impl WikiClient {
    /// `wiki_url` is the full `api.php` endpoint, `prices_url` the base the
    /// `/mapping` and `/timeseries` paths hang off.
    pub fn new(wiki_url: String, prices_url: String) -> Result<Self> {
        let client = Client::builder()
            .default_headers(courtesy_headers(DEFAULT_USER_AGENT, DEFAULT_CONTACT)?)
            .build()
            .map_err(|e| IngestError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            wiki_url,
            prices_url: prices_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client for the public wiki and price API.
    pub fn with_default_endpoints() -> Result<Self> {
        Self::new(WIKI_API_URL.to_string(), PRICES_API_URL.to_string())
    }

    /// Raw wikitext of the food table page.
    pub async fn fetch_food_table(&self) -> Result<String> {
        tracing::info!("Fetching '{}' from the wiki", FOOD_TABLE_TITLE);

        let response: QueryResponse = self
            .get_json(
                &self.wiki_url,
                &[
                    ("action", "query"),
                    ("prop", "revisions"),
                    ("rvprop", "content"),
                    ("titles", FOOD_TABLE_TITLE),
                    ("format", "json"),
                ],
            )
            .await?;

        response
            .into_wikitext()
            .ok_or_else(|| IngestError::MissingPage(FOOD_TABLE_TITLE.to_string()))
    }

    /// Every tradeable item known to the price API.
    pub async fn fetch_mapping(&self) -> Result<Vec<MappingEntry>> {
        tracing::info!("Fetching item mapping from the price API");

        let url = format!("{}/mapping", self.prices_url);
        let mapping: Vec<MappingEntry> = self.get_json(&url, &[]).await?;

        tracing::debug!("Mapping lists {} items", mapping.len());
        Ok(mapping)
    }

    /// Daily (24h step) price series for one item.
    pub async fn fetch_timeseries(&self, item_id: i32) -> Result<TimeseriesResponse> {
        let url = format!("{}/timeseries", self.prices_url);
        let id = item_id.to_string();

        self.get_json(&url, &[("timestep", "24h"), ("id", id.as_str())])
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let http_err = |source: reqwest::Error| IngestError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        let body = response.text().await.map_err(http_err)?;

        if !status.is_success() {
            return Err(IngestError::Status {
                url: url.to_string(),
                status,
                body: body.chars().take(BODY_EXCERPT_CHARS).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn courtesy_headers(user_agent: &str, contact: &str) -> Result<HeaderMap> {
    let invalid = |what: &str| IngestError::Config(format!("invalid {} header value", what));

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent).map_err(|_| invalid("User-Agent"))?,
    );
    headers.insert(FROM, HeaderValue::from_str(contact).map_err(|_| invalid("From"))?);

    Ok(headers)
}
