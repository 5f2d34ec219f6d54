//! # Catalog aggregation over message registries.
//!
//! [`StepDataCollector`] merges the registries of many
//! [`MessagesHolder`]s into one catalog, tracking duplicate ids, and
//! serializes the catalog with every language slot present in the stable
//! order (en, de, fr; `null` when absent).

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::messages::message::{Message, MessagesHolder};

/// Aggregates message registries into a single catalog.
///
/// Ids are unique across the catalog; a second definition under an id
/// already present is ignored and the id is recorded as a duplicate.
#[derive(Debug, Default)]
pub struct StepDataCollector {
    catalog: BTreeMap<String, Message>,
    duplicates: Vec<String>,
}

impl StepDataCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `holder`'s registry into the catalog.
    pub fn collect(&mut self, holder: &dyn MessagesHolder) {
        for (id, message) in holder.messages() {
            self.insert(id, message);
        }
    }

    /// Inserts a single message under `id`.
    pub fn insert(&mut self, id: impl Into<String>, message: Message) {
        let id = id.into();
        if self.catalog.contains_key(&id) {
            self.duplicates.push(id);
        } else {
            self.catalog.insert(id, message);
        }
    }

    /// Looks up a message by id.
    pub fn get(&self, id: &str) -> Option<&Message> {
        self.catalog.get(id)
    }

    /// Number of distinct messages collected.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Ids that were defined more than once, in collection order.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Serializes the catalog as JSON, ids in sorted order.
    ///
    /// Each entry carries `type` (the stable severity name), `fact` and
    /// `solution`; localized texts always encode all three language slots.
    pub fn catalog_json(&self) -> Value {
        let mut entries = serde_json::Map::new();
        for (id, message) in &self.catalog {
            entries.insert(
                id.clone(),
                json!({
                    "type": message.severity(),
                    "fact": message.fact(),
                    "solution": message.solution(),
                }),
            );
        }
        Value::Object(entries)
    }
}
