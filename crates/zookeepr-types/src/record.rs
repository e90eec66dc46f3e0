//! The [`Record`] trait.
//!
//! Animals and zookeepers are handled by the same store, query and route
//! code. This trait is the seam: it names the collection a kind lives in,
//! its constraint-set type, and its validation schema.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ids::RecordId;
use crate::query::{AnimalQuery, FromQueryPairs, ZookeeperQuery};
use crate::records::{Animal, Zookeeper};
use crate::validation::{self, ANIMAL_SCHEMA, Candidate, FieldRule, Violations, ZOOKEEPER_SCHEMA};

/// A record kind kept in its own collection.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name. Used as the top-level array field in the
    /// persisted document (`{"animals": [...]}`) and in log fields.
    const COLLECTION: &'static str;

    /// Singular noun used in client-facing messages.
    const NOUN: &'static str;

    /// Fields every candidate must carry, with their rules.
    const SCHEMA: &'static [(&'static str, FieldRule)];

    /// Constraint set accepted by the collection's list endpoint.
    type Query: FromQueryPairs + Default + Send + Sync;

    /// This record's identifier.
    fn id(&self) -> &RecordId;

    /// Whether this record satisfies every constraint in `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    /// Check a candidate against [`Self::SCHEMA`].
    fn validate(candidate: &Candidate) -> Result<(), Violations> {
        validation::validate(Self::SCHEMA, candidate)
    }

    /// Boolean form of [`Record::validate`].
    fn is_valid(candidate: &Candidate) -> bool {
        validation::is_valid(Self::SCHEMA, candidate)
    }
}

impl Record for Animal {
    const COLLECTION: &'static str = "animals";
    const NOUN: &'static str = "animal";
    const SCHEMA: &'static [(&'static str, FieldRule)] = ANIMAL_SCHEMA;
    type Query = AnimalQuery;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn matches(&self, query: &AnimalQuery) -> bool {
        query.matches(self)
    }
}

impl Record for Zookeeper {
    const COLLECTION: &'static str = "zookeepers";
    const NOUN: &'static str = "zookeeper";
    const SCHEMA: &'static [(&'static str, FieldRule)] = ZOOKEEPER_SCHEMA;
    type Query = ZookeeperQuery;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn matches(&self, query: &ZookeeperQuery) -> bool {
        query.matches(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zookeeper_validation_goes_through_schema() {
        let Some(kim) = json!({ "id": "0", "name": "Kim", "age": 28 }).as_object().cloned() else {
            return;
        };
        assert!(Zookeeper::validate(&kim).is_ok());
        assert!(Animal::validate(&kim).is_err());
    }

    #[test]
    fn is_valid_follows_the_kind_schema() {
        let Some(kim) = json!({ "id": "0", "name": "Kim", "age": 28, "favoriteAnimal": "dolphin" })
            .as_object()
            .cloned()
        else {
            return;
        };
        let Some(raksha) = json!({ "id": "1", "name": "Raksha", "age": "31", "favoriteAnimal": "penguin" })
            .as_object()
            .cloned()
        else {
            return;
        };
        assert!(Zookeeper::is_valid(&kim));
        assert!(!Zookeeper::is_valid(&raksha));
        assert!(!Animal::is_valid(&kim));
    }

    #[test]
    fn collections_have_distinct_names() {
        assert_ne!(Animal::COLLECTION, Zookeeper::COLLECTION);
    }
}
