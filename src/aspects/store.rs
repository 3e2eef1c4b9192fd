// Aspect store — the parsed reference documents, one per entity.
//
// The source file maps entity -> aspect label -> { "content": ..., ... }.
// Aspect order within an entity follows the file, because ranking ties go
// to the first candidate. The lead section is kept out of the candidate
// list; only its presence is recorded.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{RankError, Result};

/// Label of the lead section, never a ranking candidate.
pub const LEAD_SECTION: &str = "lead_paragraphs";

/// One rankable section of an entity's reference document.
#[derive(Debug, Clone, PartialEq)]
pub struct Aspect {
    pub label: String,
    pub content: String,
}

/// All sections known for one entity.
#[derive(Debug, Clone, Default)]
pub struct EntityAspects {
    /// Rankable aspects, in file order
    pub aspects: Vec<Aspect>,
    /// Whether the entity had a lead section
    pub has_lead: bool,
}

impl EntityAspects {
    /// True when the entity has any section at all, lead included.
    pub fn has_any_section(&self) -> bool {
        self.has_lead || !self.aspects.is_empty()
    }
}

#[derive(Deserialize)]
struct AspectEntry {
    content: String,
}

/// Normalize an entity identifier: underscores become spaces, lowercased.
pub fn normalize_entity(entity: &str) -> String {
    entity.replace('_', " ").to_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct AspectStore {
    entities: HashMap<String, EntityAspects>,
}

impl AspectStore {
    /// Load and parse the aspect file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| RankError::load("aspects", path, e))?;
        let root: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| RankError::load("aspects", path, e))?;
        Self::from_json(root).map_err(|reason| RankError::load("aspects", path, reason))
    }

    /// Build from an already-parsed JSON object.
    ///
    /// Two spellings of the same entity (`Ada_Lovelace`, `ada lovelace`)
    /// resolve to the one already in normalized form, wherever it appears in
    /// the file. Two spellings that both need normalizing are ambiguous.
    pub fn from_json(root: Map<String, Value>) -> std::result::Result<Self, String> {
        let mut store = AspectStore::default();
        // normalized key -> spelling it was loaded from
        let mut spellings: HashMap<String, String> = HashMap::new();

        for (entity, sections) in root {
            let Value::Object(sections) = sections else {
                return Err(format!("entity '{entity}' is not an object of aspects"));
            };

            let mut record = EntityAspects::default();
            for (label, entry) in sections {
                if label == LEAD_SECTION {
                    record.has_lead = true;
                    continue;
                }
                let entry: AspectEntry = serde_json::from_value(entry)
                    .map_err(|e| format!("aspect '{label}' of entity '{entity}': {e}"))?;
                record.aspects.push(Aspect {
                    label,
                    content: entry.content,
                });
            }

            let key = normalize_entity(&entity);
            if let Some(previous) = spellings.get(&key) {
                if *previous != key && entity != key {
                    return Err(format!(
                        "entities '{previous}' and '{entity}' both normalize to '{key}'"
                    ));
                }
                if entity != key {
                    warn!(kept = %previous, skipped = %entity, "Duplicate entity after normalization");
                    continue;
                }
                warn!(kept = %entity, skipped = %previous, "Duplicate entity after normalization");
            }

            spellings.insert(key.clone(), entity);
            store.entities.insert(key, record);
        }

        debug!(entities = store.len(), "Parsed aspect store");
        Ok(store)
    }

    /// Add or replace an entity. The key is normalized.
    pub fn insert(&mut self, entity: &str, record: EntityAspects) {
        self.entities.insert(normalize_entity(entity), record);
    }

    /// Look up an entity by any spelling that normalizes to a stored key.
    pub fn get(&self, entity: &str) -> Option<&EntityAspects> {
        self.entities.get(&normalize_entity(entity))
    }

    /// Rankable aspects for an entity. `None` when the entity is unknown.
    pub fn aspects(&self, entity: &str) -> Option<&[Aspect]> {
        self.get(entity).map(|e| e.aspects.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_from(json: &str) -> AspectStore {
        let root: Map<String, Value> = serde_json::from_str(json).unwrap();
        AspectStore::from_json(root).unwrap()
    }

    #[test]
    fn test_normalize_entity() {
        assert_eq!(normalize_entity("Barack_Obama"), "barack obama");
        assert_eq!(normalize_entity("barack obama"), "barack obama");
    }

    #[test]
    fn test_lead_section_excluded_and_order_kept() {
        let store = store_from(
            r#"{"Ada_Lovelace": {
                "lead_paragraphs": {"content": "intro"},
                "early_life": {"content": "born in london"},
                "career": {"content": "analytical engine notes"}
            }}"#,
        );
        let record = store.get("ada lovelace").unwrap();
        assert!(record.has_lead);
        let labels: Vec<&str> = record.aspects.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["early_life", "career"]);
    }

    #[test]
    fn test_lead_only_entity_has_no_candidates() {
        let store = store_from(r#"{"stub": {"lead_paragraphs": {"content": "only intro"}}}"#);
        assert_eq!(store.aspects("Stub").map(|a| a.len()), Some(0));
        assert!(store.get("stub").unwrap().has_any_section());
    }

    #[test]
    fn test_unknown_entity() {
        let store = store_from(r#"{}"#);
        assert!(store.aspects("nobody").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_content_is_an_error() {
        let root: Map<String, Value> =
            serde_json::from_str(r#"{"x": {"history": {"title": "no content"}}}"#).unwrap();
        let err = AspectStore::from_json(root).unwrap_err();
        assert!(err.contains("history"));
    }

    fn labels(store: &AspectStore, entity: &str) -> Vec<String> {
        store
            .aspects(entity)
            .unwrap()
            .iter()
            .map(|a| a.label.clone())
            .collect()
    }

    #[test]
    fn test_normalized_spelling_wins_when_last() {
        let store = store_from(
            r#"{
                "Ada_Lovelace": {"raw": {"content": "a"}},
                "ada lovelace": {"clean": {"content": "b"}}
            }"#,
        );
        assert_eq!(store.len(), 1);
        assert_eq!(labels(&store, "Ada_Lovelace"), vec!["clean"]);
    }

    #[test]
    fn test_normalized_spelling_wins_when_first() {
        let store = store_from(
            r#"{
                "ada lovelace": {"clean": {"content": "b"}},
                "Ada_Lovelace": {"raw": {"content": "a"}}
            }"#,
        );
        assert_eq!(store.len(), 1);
        assert_eq!(labels(&store, "ada lovelace"), vec!["clean"]);
    }

    #[test]
    fn test_ambiguous_spellings_are_an_error() {
        let root: Map<String, Value> = serde_json::from_str(
            r#"{
                "Ada_Lovelace": {"raw": {"content": "a"}},
                "ADA LOVELACE": {"shout": {"content": "b"}}
            }"#,
        )
        .unwrap();
        let err = AspectStore::from_json(root).unwrap_err();
        assert!(err.contains("both normalize to 'ada lovelace'"), "{err}");
    }

    #[test]
    fn test_lead_value_may_be_anything() {
        let store = store_from(r#"{"x": {"lead_paragraphs": null, "history": {"content": "h"}}}"#);
        assert_eq!(store.aspects("x").unwrap().len(), 1);
    }
}
