//! Record collections for Zookeepr.
//!
//! A [`RecordStore`] owns one collection (animals or zookeepers): the
//! records in memory, the id counter, and the path of the JSON file the
//! collection is persisted to. Every successful create rewrites that file
//! in full.
//!
//! The read side is a pair of pure functions in [`query`] that work on any
//! slice of records, so they can be used and tested without a store.
//!
//! # Modules
//!
//! - [`error`] -- [`StoreError`], the failure type for loading and creating
//! - [`file`] -- Reading and overwriting collection documents
//! - [`query`] -- [`filter_by_query`] and [`find_by_id`]
//! - [`store`] -- [`RecordStore`]

pub mod error;
pub mod file;
pub mod query;
pub mod store;

pub use error::StoreError;
pub use query::{filter_by_query, find_by_id};
pub use store::RecordStore;
