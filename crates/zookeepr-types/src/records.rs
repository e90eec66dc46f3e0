//! Record structs for the two collections.
//!
//! Field names follow the persisted JSON (`personalityTraits`,
//! `favoriteAnimal`). Any field a client sends beyond the known set is
//! kept in `extra` and written back to disk unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::ids::RecordId;

/// An animal kept at the zoo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Identifier, unique within the animals collection.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Species, e.g. `bear`.
    pub species: String,
    /// Diet, e.g. `omnivore`.
    pub diet: String,
    /// Ordered personality traits.
    pub personality_traits: Vec<String>,
    /// Fields outside the schema, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A zookeeper working at the zoo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zookeeper {
    /// Identifier, unique within the zookeepers collection.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Age in years. Always a JSON number, never a numeric string.
    pub age: Number,
    /// The keeper's favourite animal, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_animal: Option<String>,
    /// Fields outside the schema, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
