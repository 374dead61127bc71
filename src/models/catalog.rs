use serde::{Deserialize, Serialize};

/// One tradeable food item, ready for the catalog upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub item_id: i32,
    pub name: String,
    /// Highest amount healed when the wiki lists a range
    pub heal_amount: i32,
}

/// A row of the food table that passed the tradeable check but has not
/// been matched to an item id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodCandidate {
    pub name: String,
    pub heal_amount: i32,
}

/// Entry of the price API `/mapping` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingEntry {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub members: Option<bool>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub highalch: Option<i64>,
    #[serde(default)]
    pub lowalch: Option<i64>,
    #[serde(default)]
    pub examine: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}
