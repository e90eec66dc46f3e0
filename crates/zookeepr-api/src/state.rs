//! Shared application state for the API server.
//!
//! [`AppState`] owns one [`RecordStore`] per collection and the directory
//! the static front-end is served from. It is built once at startup and
//! injected into handlers via Axum's `State` extractor, so tests can build
//! an isolated instance over a scratch directory.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use zookeepr_store::RecordStore;
use zookeepr_types::{Animal, Zookeeper};

/// A collection behind a read-write lock, shareable across handlers.
pub type SharedStore<R> = Arc<RwLock<RecordStore<R>>>;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The animals collection.
    pub animals: SharedStore<Animal>,
    /// The zookeepers collection.
    pub zookeepers: SharedStore<Zookeeper>,
    /// Directory holding `index.html`, `animals.html`, `zookeepers.html`
    /// and the `assets/` tree.
    pub public_dir: PathBuf,
}

impl AppState {
    /// Create the application state from loaded stores.
    pub fn new(
        animals: RecordStore<Animal>,
        zookeepers: RecordStore<Zookeeper>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            animals: Arc::new(RwLock::new(animals)),
            zookeepers: Arc::new(RwLock::new(zookeepers)),
            public_dir: public_dir.into(),
        }
    }
}
