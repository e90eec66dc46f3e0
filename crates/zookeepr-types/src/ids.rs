//! Record identifier.
//!
//! Identifiers are plain strings on the wire and on disk (`"0"`, `"1"`,
//! ...). The store hands them out from a monotonic counter, so the
//! newtype only guards against mixing ids with other strings at compile
//! time; it does not constrain the content.

use serde::{Deserialize, Serialize};

/// Identifier naming one record uniquely within its collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Build the identifier for the `n`th id handed out by a collection.
    pub fn from_sequence(n: u64) -> Self {
        Self(n.to_string())
    }

    /// Return the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the identifier as a sequence number, if it is one.
    ///
    /// Seeded data may carry arbitrary ids; only the numeric ones take
    /// part in picking the next sequence number.
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = RecordId::from_sequence(3);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"3\""));
    }

    #[test]
    fn sequence_only_for_numeric_ids() {
        assert_eq!(RecordId::from("12").sequence(), Some(12));
        assert_eq!(RecordId::from("kim").sequence(), None);
        assert_eq!(RecordId::from("-1").sequence(), None);
    }
}
