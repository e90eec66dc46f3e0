//! [`RecordStore`]: one collection in memory plus its backing file.
//!
//! The store is an owned value. The API layer wraps each store in a
//! [`tokio::sync::RwLock`] and hands it to handlers through shared state,
//! so id assignment, validation, append and persistence for one create
//! all happen under the same write guard.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};
use zookeepr_types::{Candidate, Record, RecordId};

use crate::error::StoreError;
use crate::file;
use crate::query;

/// One collection of records of kind `R`.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    /// Records in insertion order.
    records: Vec<R>,
    /// Sequence number of the next id to hand out.
    next_id: u64,
    /// The JSON file the collection is persisted to.
    path: PathBuf,
}

impl<R: Record> RecordStore<R> {
    /// Build a store from records already in memory.
    ///
    /// Nothing is written until the first create.
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<R>) -> Self {
        let next_id = first_free_sequence(&records);
        Self {
            records,
            next_id,
            path: path.into(),
        }
    }

    /// Load the collection persisted at `path`.
    ///
    /// A missing file yields an empty collection; a malformed one is an
    /// error.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if let Some(records) = file::read_collection::<R>(&path).await? {
            records
        } else {
            warn!(
                collection = R::COLLECTION,
                path = %path.display(),
                "Collection file not found, starting empty"
            );
            Vec::new()
        };

        let store = Self::from_records(path, records);
        info!(
            collection = R::COLLECTION,
            records = store.len(),
            next_id = store.next_id,
            path = %store.path.display(),
            "Collection loaded"
        );
        Ok(store)
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The id the next successful create will receive.
    pub fn next_id(&self) -> RecordId {
        RecordId::from_sequence(self.next_id)
    }

    /// Records satisfying every constraint in `query`.
    pub fn filter(&self, query: &R::Query) -> Vec<&R> {
        query::filter_by_query(query, &self.records)
    }

    /// The first record with id `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&R> {
        query::find_by_id(id, &self.records)
    }

    /// Assign an id to `candidate`, validate it, append it and persist the
    /// whole collection.
    ///
    /// Any `id` the candidate carries is replaced. On a validation failure
    /// nothing changes. On a write failure the append is undone so memory
    /// and disk agree, and the id is not consumed.
    pub async fn create(&mut self, mut candidate: Candidate) -> Result<R, StoreError> {
        let id = self.next_id();
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted {
                collection: R::COLLECTION,
            })?;

        candidate.insert(String::from("id"), Value::String(id.0.clone()));

        if let Err(violations) = R::validate(&candidate) {
            warn!(
                collection = R::COLLECTION,
                %violations,
                "Rejected malformed record"
            );
            return Err(StoreError::Invalid {
                noun: R::NOUN,
                violations,
            });
        }

        let record: R = serde_json::from_value(Value::Object(candidate))?;
        self.records.push(record.clone());

        if let Err(e) = file::write_collection(&self.path, &self.records).await {
            self.records.pop();
            error!(
                collection = R::COLLECTION,
                error = %e,
                "Failed to persist collection, append rolled back"
            );
            return Err(e);
        }

        self.next_id = following;
        info!(collection = R::COLLECTION, %id, records = self.len(), "Record created");

        Ok(record)
    }
}

/// The smallest sequence number not yet used and not behind the length.
///
/// For a collection seeded with ids `"0".."N-1"` this is `N`.
fn first_free_sequence<R: Record>(records: &[R]) -> u64 {
    let by_len = u64::try_from(records.len()).unwrap_or(u64::MAX);
    records
        .iter()
        .filter_map(|r| r.id().sequence())
        .max()
        .map_or(by_len, |highest| highest.saturating_add(1).max(by_len))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::arithmetic_side_effects
)]
mod tests {
    use serde_json::{Map, json};
    use zookeepr_types::{Animal, AnimalQuery, FromQueryPairs, Zookeeper};

    use super::*;

    fn candidate(value: Value) -> Candidate {
        match value {
            Value::Object(map) => map,
            _ => Candidate::new(),
        }
    }

    fn seeded_animals(path: &Path) -> RecordStore<Animal> {
        let records = ["Novak", "Gumbo", "Erica"]
            .iter()
            .enumerate()
            .map(|(i, name)| Animal {
                id: RecordId::from(i.to_string()),
                name: (*name).to_owned(),
                species: String::from("bear"),
                diet: String::from("omnivore"),
                personality_traits: vec![String::from("goofy")],
                extra: Map::new(),
            })
            .collect();
        RecordStore::from_records(path, records)
    }

    async fn persisted_len(path: &Path, collection: &str) -> usize {
        let text = tokio::fs::read_to_string(path).await.unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        doc[collection].as_array().unwrap().len()
    }

    fn rex() -> Candidate {
        candidate(json!({
            "name": "Rex",
            "species": "dog",
            "diet": "omnivore",
            "personalityTraits": ["loyal"]
        }))
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        file::write_collection(&path, seeded_animals(&path).records()).await.unwrap();
        let mut store = seeded_animals(&path);
        let before = persisted_len(&path, "animals").await;

        let created = store.create(rex()).await.unwrap();

        assert_eq!(created.id.as_str(), "3");
        assert_eq!(created.name, "Rex");
        assert_eq!(store.len(), 4);
        assert_eq!(persisted_len(&path, "animals").await, before + 1);
        assert_eq!(store.next_id().as_str(), "4");
    }

    #[tokio::test]
    async fn client_supplied_id_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded_animals(&dir.path().join("animals.json"));
        let mut body = rex();
        body.insert(String::from("id"), json!("999"));

        let created = store.create(body).await.unwrap();
        assert_eq!(created.id.as_str(), "3");
    }

    #[tokio::test]
    async fn invalid_candidate_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zookeepers.json");
        let mut store: RecordStore<Zookeeper> = RecordStore::from_records(&path, Vec::new());

        let err = store
            .create(candidate(json!({ "name": "Raksha", "age": "31" })))
            .await
            .unwrap_err();

        match err {
            StoreError::Invalid { noun, violations } => {
                assert_eq!(noun, "zookeeper");
                assert!(violations.concerns("age"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
        assert_eq!(store.next_id().as_str(), "0");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("animals.json");
        std::fs::create_dir(&path).unwrap();
        let mut store = seeded_animals(&path);

        let err = store.create(rex()).await.unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.len(), 3);
        assert_eq!(store.next_id().as_str(), "3");
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::<Zookeeper>::load(dir.path().join("none.json"))
            .await
            .unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_id().as_str(), "0");
    }

    #[tokio::test]
    async fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(RecordStore::<Animal>::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn created_records_are_visible_to_queries() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = seeded_animals(&dir.path().join("animals.json"));
        store.create(rex()).await.unwrap();

        let dogs = store.filter(&AnimalQuery::from_pairs([("species", "dog")]));
        assert_eq!(dogs.len(), 1);
        assert_eq!(store.find_by_id("3").map(|a| a.name.as_str()), Some("Rex"));
    }

    #[test]
    fn ids_are_never_reissued() {
        let records = vec![Zookeeper {
            id: RecordId::from("7"),
            name: String::from("Kim"),
            age: serde_json::Number::from(28),
            favorite_animal: None,
            extra: Map::new(),
        }];
        let store = RecordStore::from_records("z.json", records);
        assert_eq!(store.next_id().as_str(), "8");
    }

    #[test]
    fn non_numeric_ids_fall_back_to_length() {
        let records = vec![Zookeeper {
            id: RecordId::from("kim"),
            name: String::from("Kim"),
            age: serde_json::Number::from(28),
            favorite_animal: None,
            extra: Map::new(),
        }];
        let store = RecordStore::from_records("z.json", records);
        assert_eq!(store.next_id().as_str(), "1");
    }
}
