//! Zookeepr server binary.
//!
//! Loads configuration, seeds both collections from their JSON files, and
//! serves the REST API and the static front-end until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `zookeepr-config.yaml` (optional)
//! 2. Initialize structured logging (tracing)
//! 3. Load the animals and zookeepers collections
//! 4. Build the shared application state
//! 5. Serve

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use zookeepr_api::AppState;
use zookeepr_store::RecordStore;
use zookeepr_types::{Animal, Zookeeper};

use crate::config::ZookeeprConfig;
use crate::error::AppError;

/// Location of the optional configuration file.
const CONFIG_PATH: &str = "zookeepr-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, a collection file, or the listener
/// cannot be loaded or bound.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so report after init.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("zookeepr starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Load collections.
    let animals = RecordStore::<Animal>::load(&config.data.animals_path).await?;
    let zookeepers = RecordStore::<Zookeeper>::load(&config.data.zookeepers_path).await?;

    // 4. Assemble state.
    let state = Arc::new(AppState::new(animals, zookeepers, &config.public_dir));
    info!(public_dir = %config.public_dir.display(), "Serving front-end");

    // 5. Serve until Ctrl-C.
    zookeepr_api::start_server(&config.server_config(), state).await?;

    info!("zookeepr shutdown complete");
    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], or defaults when it is absent.
///
/// Returns whether the file was found alongside the config.
fn load_config() -> Result<(ZookeeprConfig, bool), AppError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((ZookeeprConfig::from_file(path)?, true))
    } else {
        Ok((ZookeeprConfig::from_env()?, false))
    }
}
