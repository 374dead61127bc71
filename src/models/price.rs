use serde::{Deserialize, Serialize};

/// Average high price of one item on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub item_id: i32,
    pub date: String,
    pub price: Option<i32>,
}

/// Response of the price API `/timeseries?timestep=24h` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesResponse {
    pub data: Vec<TimeseriesPoint>,
    #[serde(default)]
    pub item_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPoint {
    pub timestamp: i64,
    pub avg_high_price: Option<i32>,
    #[serde(default)]
    pub avg_low_price: Option<i32>,
    #[serde(default)]
    pub high_price_volume: Option<i64>,
    #[serde(default)]
    pub low_price_volume: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeseries_decodes_null_prices() {
        let raw = r#"{
            "data": [
                {"timestamp": 1709769600, "avgHighPrice": 812, "avgLowPrice": 790, "highPriceVolume": 10, "lowPriceVolume": 4},
                {"timestamp": 1709856000, "avgHighPrice": null, "avgLowPrice": 801, "highPriceVolume": 0, "lowPriceVolume": 2}
            ],
            "itemId": 385
        }"#;

        let response: TimeseriesResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(response.item_id, Some(385));
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].avg_high_price, Some(812));
        assert_eq!(response.data[1].avg_high_price, None);
    }

    #[test]
    fn test_timeseries_requires_data() {
        let result: Result<TimeseriesResponse, _> =
            serde_json::from_str(r#"{"error": "Invalid id"}"#);
        assert!(result.is_err());
    }
}
