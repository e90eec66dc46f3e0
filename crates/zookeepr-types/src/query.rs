//! Constraint sets for filtering collections.
//!
//! A constraint set is built from the raw `(key, value)` pairs of a URL
//! query string rather than a flat map, because the animals endpoint
//! accepts `personalityTraits` repeated once per trait. Keys that name no
//! filterable field are dropped, and so are empty values: the front-end
//! sends `diet=` when no diet is selected and that must not constrain
//! anything.

use serde_json::Number;

use crate::records::{Animal, Zookeeper};

/// Construction of a constraint set from URL query pairs.
pub trait FromQueryPairs: Sized {
    /// Build the constraint set, ignoring unrecognized keys.
    fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>;
}

/// Constraints over the animals collection.
///
/// Every supplied field must match; an empty set matches every animal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalQuery {
    /// Traits the animal must all have (in any order).
    pub personality_traits: Vec<String>,
    /// Exact diet.
    pub diet: Option<String>,
    /// Exact species.
    pub species: Option<String>,
    /// Exact name.
    pub name: Option<String>,
}

impl AnimalQuery {
    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.personality_traits.is_empty()
            && self.diet.is_none()
            && self.species.is_none()
            && self.name.is_none()
    }

    /// Whether `animal` satisfies every constraint.
    pub fn matches(&self, animal: &Animal) -> bool {
        self.personality_traits
            .iter()
            .all(|trait_| animal.personality_traits.contains(trait_))
            && equals(self.diet.as_deref(), &animal.diet)
            && equals(self.species.as_deref(), &animal.species)
            && equals(self.name.as_deref(), &animal.name)
    }
}

impl FromQueryPairs for AnimalQuery {
    fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "personalityTraits" => query.personality_traits.push(value.to_owned()),
                "diet" => query.diet = Some(value.to_owned()),
                "species" => query.species = Some(value.to_owned()),
                "name" => query.name = Some(value.to_owned()),
                _ => {}
            }
        }
        query
    }
}

/// Constraint on a zookeeper's numeric age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeConstraint {
    /// The age must equal this number.
    Equals(Number),
    /// The query text was not a number, so no keeper can match.
    Unsatisfiable(String),
}

impl AgeConstraint {
    /// Parse the query text for `age`.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str::<Number>(raw.trim())
            .map_or_else(|_| Self::Unsatisfiable(raw.to_owned()), Self::Equals)
    }

    /// Whether `age` satisfies the constraint.
    ///
    /// `28` and `28.0` are the same age. Integers compare exactly.
    pub fn matches(&self, age: &Number) -> bool {
        match self {
            Self::Equals(wanted) => same_number(wanted, age),
            Self::Unsatisfiable(_) => false,
        }
    }
}

fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    a.as_f64()
        .zip(b.as_f64())
        .is_some_and(|(x, y)| x.total_cmp(&y).is_eq())
}

/// Constraints over the zookeepers collection.
///
/// Each field of the record can be named directly in the query and is
/// compared by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZookeeperQuery {
    /// Exact id.
    pub id: Option<String>,
    /// Exact name.
    pub name: Option<String>,
    /// Numeric age.
    pub age: Option<AgeConstraint>,
    /// Exact favourite animal. Keepers without one never match.
    pub favorite_animal: Option<String>,
}

impl ZookeeperQuery {
    /// Whether no constraint is set.
    pub const fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.age.is_none()
            && self.favorite_animal.is_none()
    }

    /// Whether `keeper` satisfies every constraint.
    pub fn matches(&self, keeper: &Zookeeper) -> bool {
        equals(self.id.as_deref(), keeper.id.as_str())
            && equals(self.name.as_deref(), &keeper.name)
            && self.age.as_ref().is_none_or(|age| age.matches(&keeper.age))
            && self
                .favorite_animal
                .as_deref()
                .is_none_or(|wanted| keeper.favorite_animal.as_deref() == Some(wanted))
    }
}

impl FromQueryPairs for ZookeeperQuery {
    fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "id" => query.id = Some(value.to_owned()),
                "name" => query.name = Some(value.to_owned()),
                "age" => query.age = Some(AgeConstraint::parse(value)),
                "favoriteAnimal" => query.favorite_animal = Some(value.to_owned()),
                _ => {}
            }
        }
        query
    }
}

fn equals(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}
