//! Candidate record validation.
//!
//! Each record kind declares a schema: an ordered list of field names and
//! the [`FieldRule`] the field must satisfy. [`validate`] walks the schema
//! over a candidate JSON object and collects every failing field into
//! [`Violations`] instead of stopping at the first one, so a client sees
//! the whole list in a single 400 response.
//!
//! Rules check presence and primitive type only. Fields outside the
//! schema are allowed and left alone.

use serde_json::{Map, Value};

/// A candidate record as received from a client.
pub type Candidate = Map<String, Value>;

/// What a single schema field requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Present, a string, and not empty.
    RequiredString,
    /// Present with any value.
    Present,
    /// Present and an array whose items are all strings.
    StringArray,
    /// Present, a JSON number, and greater than zero.
    PositiveNumber,
    /// Absent, `null`, or a string.
    OptionalString,
}

/// One reason a candidate failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A required field is absent or `null`.
    #[error("`{field}` is required")]
    Missing {
        /// The schema field name.
        field: &'static str,
    },

    /// The field must be a string.
    #[error("`{field}` must be a string, not {found}")]
    NotAString {
        /// The schema field name.
        field: &'static str,
        /// JSON type actually received.
        found: &'static str,
    },

    /// The field is a string but empty.
    #[error("`{field}` must not be empty")]
    Empty {
        /// The schema field name.
        field: &'static str,
    },

    /// The field must be an array of strings.
    #[error("`{field}` must be an array of strings")]
    NotAStringArray {
        /// The schema field name.
        field: &'static str,
    },

    /// The field must be a JSON number. Numeric strings do not count.
    #[error("`{field}` must be a number, not {found}")]
    NotANumber {
        /// The schema field name.
        field: &'static str,
        /// JSON type actually received.
        found: &'static str,
    },

    /// The field is a number but not greater than zero.
    #[error("`{field}` must be greater than zero")]
    NotPositive {
        /// The schema field name.
        field: &'static str,
    },
}

impl Violation {
    /// The schema field this violation is about.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::NotAString { field, .. }
            | Self::Empty { field }
            | Self::NotAStringArray { field }
            | Self::NotANumber { field, .. }
            | Self::NotPositive { field } => *field,
        }
    }
}

/// Every violation found in one candidate, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    /// Whether any violation was recorded.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Whether a violation was recorded for `field`.
    pub fn concerns(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field() == field)
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// Schema for animal candidates.
pub const ANIMAL_SCHEMA: &[(&str, FieldRule)] = &[
    ("name", FieldRule::RequiredString),
    ("species", FieldRule::RequiredString),
    ("diet", FieldRule::RequiredString),
    ("personalityTraits", FieldRule::StringArray),
];

/// Schema for zookeeper candidates.
pub const ZOOKEEPER_SCHEMA: &[(&str, FieldRule)] = &[
    ("name", FieldRule::RequiredString),
    ("id", FieldRule::Present),
    ("age", FieldRule::PositiveNumber),
    ("favoriteAnimal", FieldRule::OptionalString),
];

/// Check `candidate` against `schema`.
///
/// Returns `Ok(())` when every rule holds, or every violation otherwise.
/// Never panics.
pub fn validate(
    schema: &[(&'static str, FieldRule)],
    candidate: &Candidate,
) -> Result<(), Violations> {
    let violations: Vec<Violation> = schema
        .iter()
        .filter_map(|&(field, rule)| check(field, rule, candidate.get(field)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Violations(violations))
    }
}

/// Whether `candidate` satisfies every rule in `schema`.
pub fn is_valid(schema: &[(&'static str, FieldRule)], candidate: &Candidate) -> bool {
    validate(schema, candidate).is_ok()
}

fn check(field: &'static str, rule: FieldRule, value: Option<&Value>) -> Option<Violation> {
    let value = match (rule, value) {
        (FieldRule::OptionalString, None | Some(Value::Null)) => return None,
        (_, None | Some(Value::Null)) => return Some(Violation::Missing { field }),
        (_, Some(value)) => value,
    };

    match rule {
        FieldRule::Present => None,
        FieldRule::RequiredString => match value {
            Value::String(s) if s.is_empty() => Some(Violation::Empty { field }),
            Value::String(_) => None,
            other => Some(Violation::NotAString {
                field,
                found: json_type(other),
            }),
        },
        FieldRule::OptionalString => match value {
            Value::String(_) => None,
            other => Some(Violation::NotAString {
                field,
                found: json_type(other),
            }),
        },
        FieldRule::StringArray => match value {
            Value::Array(items) if items.iter().all(Value::is_string) => None,
            _ => Some(Violation::NotAStringArray { field }),
        },
        FieldRule::PositiveNumber => match value {
            Value::Number(n) if n.as_f64().is_some_and(|v| v > 0.0) => None,
            Value::Number(_) => Some(Violation::NotPositive { field }),
            other => Some(Violation::NotANumber {
                field,
                found: json_type(other),
            }),
        },
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
