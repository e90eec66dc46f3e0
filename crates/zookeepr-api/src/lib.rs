//! HTTP API server for Zookeepr.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for listing, filtering, fetching and creating
//!   animals and zookeepers
//! - **Static front-end** pages (`/`, `/animals`, `/zookeepers`) and their
//!   assets, served from a `public/` directory, with every unknown path
//!   falling back to the home page
//!
//! # Architecture
//!
//! Each collection is a [`RecordStore`] behind its own
//! [`tokio::sync::RwLock`] inside [`AppState`]. Reads share the lock;
//! a create holds the write guard from id assignment through to the file
//! rewrite, so concurrent creates never see the same id.
//!
//! [`RecordStore`]: zookeepr_store::RecordStore

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, SharedStore};
