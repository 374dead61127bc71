//! MediaWiki `action=query&prop=revisions` envelope.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub query: Query,
}

#[derive(Debug, Deserialize)]
pub struct Query {
    /// Keyed by page id; missing titles come back under a negative id
    pub pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    #[serde(rename = "*")]
    pub content: Option<String>,
}

impl QueryResponse {
    /// Content of the first page that carries a revision.
    pub fn into_wikitext(self) -> Option<String> {
        self.query
            .pages
            .into_values()
            .flat_map(|page| page.revisions)
            .find_map(|revision| revision.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_revision_content() {
        let raw = r#"{
            "batchcomplete": "",
            "query": {
                "pages": {
                    "366887": {
                        "pageid": 366887,
                        "ns": 0,
                        "title": "Food/All food",
                        "revisions": [{"contentformat": "text/x-wiki", "contentmodel": "wikitext", "*": "{| class=\"wikitable\"\n|-\n|}"}]
                    }
                }
            }
        }"#;

        let response: QueryResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.into_wikitext().as_deref(),
            Some("{| class=\"wikitable\"\n|-\n|}")
        );
    }

    #[test]
    fn test_missing_page_has_no_content() {
        let raw = r#"{"query": {"pages": {"-1": {"ns": 0, "title": "Nope", "missing": ""}}}}"#;

        let response: QueryResponse = serde_json::from_str(raw).unwrap();
        assert!(response.into_wikitext().is_none());
    }
}
