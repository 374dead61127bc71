// src/scrapers/name_resolver.rs

use indexmap::IndexMap;

use crate::error::{IngestError, Result};
use crate::models::catalog::{CatalogEntry, FoodCandidate, MappingEntry};

/// Canonical item name -> item id, in the order the mapping endpoint
/// listed them. Rebuilt every run, never persisted.
#[derive(Debug, Clone, Default)]
pub struct NameMappingIndex {
    ids: IndexMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Exact(i32),
    /// No exact key; `matched` is the last key containing the name
    Substring {
        item_id: i32,
        matched: &'a str,
        candidates: usize,
    },
}

impl Resolution<'_> {
    pub fn item_id(&self) -> i32 {
        match self {
            Resolution::Exact(id) => *id,
            Resolution::Substring { item_id, .. } => *item_id,
        }
    }
}

impl NameMappingIndex {
    /// A name listed twice keeps its first position and its last id.
    pub fn from_mapping(entries: &[MappingEntry]) -> Self {
        entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Exact lookup first. Otherwise every key containing `name` is a
    /// candidate and the last one in index order wins, e.g. the food
    /// table says "Strawberries" while the mapping only knows
    /// "Strawberries(1)".."Strawberries(5)".
    ///
    /// Picking the last candidate is inherited behaviour that existing
    /// catalogs depend on; it is not a considered tie-break.
    pub fn resolve(&self, name: &str) -> Option<Resolution<'_>> {
        if let Some(id) = self.ids.get(name) {
            return Some(Resolution::Exact(*id));
        }

        let mut candidates = 0;
        let mut last = None;
        for (key, id) in &self.ids {
            if key.contains(name) {
                candidates += 1;
                last = Some((key.as_str(), *id));
            }
        }

        last.map(|(matched, item_id)| Resolution::Substring {
            item_id,
            matched,
            candidates,
        })
    }
}

impl FromIterator<(String, i32)> for NameMappingIndex {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        let mut ids = IndexMap::new();
        for (name, id) in iter {
            ids.insert(name, id);
        }
        Self { ids }
    }
}

/// Resolve every candidate to an item id.
///
/// An unresolvable name aborts the whole batch. When two rows land on the
/// same id the later row's values win, at the earlier row's position, so
/// a single upsert never touches the same key twice.
pub fn reconcile(candidates: Vec<FoodCandidate>, index: &NameMappingIndex) -> Result<Vec<CatalogEntry>> {
    let mut entries: IndexMap<i32, CatalogEntry> = IndexMap::with_capacity(candidates.len());
    let mut fallback_count = 0;

    for candidate in candidates {
        let resolution = index
            .resolve(&candidate.name)
            .ok_or_else(|| IngestError::Unresolved {
                name: candidate.name.clone(),
            })?;

        if let Resolution::Substring { matched, candidates, .. } = &resolution {
            fallback_count += 1;
            if *candidates > 1 {
                tracing::warn!(
                    "'{}' matched {} mapping names, using the last one: '{}'",
                    candidate.name,
                    candidates,
                    matched
                );
            } else {
                tracing::debug!("'{}' resolved via '{}'", candidate.name, matched);
            }
        }

        let item_id = resolution.item_id();
        if let Some(previous) = entries.get(&item_id) {
            tracing::debug!(
                "Item {} listed again ('{}' replaces '{}')",
                item_id,
                candidate.name,
                previous.name
            );
        }

        entries.insert(
            item_id,
            CatalogEntry {
                item_id,
                name: candidate.name,
                heal_amount: candidate.heal_amount,
            },
        );
    }

    tracing::info!(
        "Resolved {} catalog entries ({} via substring fallback)",
        entries.len(),
        fallback_count
    );

    Ok(entries.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(pairs: &[(&str, i32)]) -> NameMappingIndex {
        pairs.iter().map(|(name, id)| (name.to_string(), *id)).collect()
    }

    fn candidate(name: &str, heal_amount: i32) -> FoodCandidate {
        FoodCandidate {
            name: name.to_string(),
            heal_amount,
        }
    }

    #[test]
    fn test_exact_match() {
        let idx = index(&[("Shark", 385), ("Shark lure", 12345)]);

        assert_eq!(idx.resolve("Shark"), Some(Resolution::Exact(385)));
    }

    #[test]
    fn test_substring_fallback_picks_last() {
        let idx = index(&[("strawberry(2)", 10), ("strawberry(6)", 11)]);

        let resolution = idx.resolve("strawberry").unwrap();
        assert_eq!(resolution.item_id(), 11);
        assert_eq!(
            resolution,
            Resolution::Substring {
                item_id: 11,
                matched: "strawberry(6)",
                candidates: 2
            }
        );
    }

    #[test]
    fn test_substring_fallback_follows_index_order() {
        let idx = index(&[("strawberry(6)", 11), ("strawberry(2)", 10)]);

        assert_eq!(idx.resolve("strawberry").unwrap().item_id(), 10);
    }

    #[test]
    fn test_substring_is_case_sensitive() {
        let idx = index(&[("Strawberries(5)", 5504)]);

        assert!(idx.resolve("strawberries").is_none());
    }

    #[test]
    fn test_duplicate_names_last_id_wins() {
        let mapping = vec![
            MappingEntry {
                id: 1,
                name: "Cake".to_string(),
                members: None,
                limit: None,
                value: None,
                highalch: None,
                lowalch: None,
                examine: None,
                icon: None,
            },
            MappingEntry {
                id: 2,
                name: "Cake".to_string(),
                members: Some(false),
                limit: Some(1000),
                value: None,
                highalch: None,
                lowalch: None,
                examine: None,
                icon: None,
            },
        ];

        let idx = NameMappingIndex::from_mapping(&mapping);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.resolve("Cake"), Some(Resolution::Exact(2)));
    }

    #[test]
    fn test_mapping_payload_decodes() {
        let raw = r#"[
            {"examine": "I'd better be careful eating this.", "id": 385, "members": true, "lowalch": 80, "limit": 10000, "value": 200, "highalch": 120, "icon": "Shark.png", "name": "Shark"},
            {"id": 1993, "name": "Jug of wine"}
        ]"#;

        let mapping: Vec<MappingEntry> = serde_json::from_str(raw).unwrap();
        let idx = NameMappingIndex::from_mapping(&mapping);

        assert_eq!(idx.len(), 2);
        assert_eq!(idx.resolve("Jug of wine"), Some(Resolution::Exact(1993)));
    }

    #[test]
    fn test_reconcile_resolves_in_order() {
        let idx = index(&[("Shark", 385), ("Strawberries(5)", 5504), ("Lobster", 379)]);

        let entries = reconcile(
            vec![candidate("Lobster", 12), candidate("Strawberries", 6), candidate("Shark", 20)],
            &idx,
        )
        .unwrap();

        let ids: Vec<i32> = entries.iter().map(|e| e.item_id).collect();
        assert_eq!(ids, vec![379, 5504, 385]);
        assert_eq!(entries[1].name, "Strawberries");
        assert_eq!(entries[1].heal_amount, 6);
    }

    #[test]
    fn test_reconcile_unresolvable_is_fatal() {
        let idx = index(&[("Shark", 385)]);

        let err = reconcile(vec![candidate("Shark", 20), candidate("Rock cake", 0)], &idx).unwrap_err();
        assert!(matches!(err, IngestError::Unresolved { name } if name == "Rock cake"));
    }

    #[test]
    fn test_reconcile_deduplicates_ids() {
        let idx = index(&[("Cake", 1891), ("Chocolate cake", 1897)]);

        let entries = reconcile(
            vec![candidate("Cake", 4), candidate("Chocolate cake", 5), candidate("Cake", 12)],
            &idx,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], CatalogEntry { item_id: 1891, name: "Cake".to_string(), heal_amount: 12 });
        assert_eq!(entries[1].item_id, 1897);
    }

    #[test]
    fn test_reconcile_keeps_apostrophes_raw() {
        let idx = index(&[("Wizard's mind bomb", 1907)]);

        let entries = reconcile(vec![candidate("Wizard's mind bomb", 1)], &idx).unwrap();
        assert_eq!(entries[0].name, "Wizard's mind bomb");
    }
}
