//! Shared type definitions for Zookeepr.
//!
//! This crate is the single source of truth for the two record kinds the
//! service keeps (animals and zookeepers), the constraint sets used to
//! filter them, and the validation schema each candidate record must pass
//! before it is created.
//!
//! # Modules
//!
//! - [`ids`] -- The string identifier shared by every record kind
//! - [`records`] -- [`Animal`] and [`Zookeeper`] record structs
//! - [`query`] -- Constraint sets built from URL query pairs
//! - [`validation`] -- Per-kind schemas and the [`Violations`] result
//! - [`record`] -- The [`Record`] trait tying a kind to its collection

pub mod ids;
pub mod query;
pub mod record;
pub mod records;
pub mod validation;

// Re-export all public types at crate root for convenience.
pub use ids::RecordId;
pub use query::{AgeConstraint, AnimalQuery, FromQueryPairs, ZookeeperQuery};
pub use record::Record;
pub use records::{Animal, Zookeeper};
pub use validation::{Candidate, FieldRule, Violation, Violations};
