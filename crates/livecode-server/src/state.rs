//! Application state shared by all handlers.
//!
//! [`AppState`] holds the [`ProgramService`] (which owns an
//! `Arc<dyn CodeStore>`) and the assets directory. The backend is chosen
//! once here, at start-up, and nothing downstream branches on it.
//! Synchronization lives inside the store backends, so no outer lock is
//! taken around the service.

use std::path::PathBuf;
use std::sync::Arc;

use livecode_storage::{CodeStore, DirStore, InMemoryStore};

use crate::config::{Backend, ServerConfig, DEFAULT_ASSETS_DIR};
use crate::error::ApiError;
use crate::service::ProgramService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Program access for all handlers.
    pub service: ProgramService,
    /// Directory of vendored third-party assets served under `/www/`.
    pub assets_dir: Arc<PathBuf>,
}

impl AppState {
    /// Builds state for the configured backend, bootstrapping the default
    /// program.
    pub fn new(config: &ServerConfig) -> Result<Self, ApiError> {
        let store: Arc<dyn CodeStore> = match &config.backend {
            Backend::Memory => {
                tracing::warn!("no LIVECODE_STATE_DIR set, programs are kept in memory only");
                Arc::new(InMemoryStore::new())
            }
            Backend::Directory(dir) => {
                tracing::info!(dir = %dir.display(), "using directory store");
                Arc::new(DirStore::open(dir.clone())?)
            }
        };
        Ok(Self::with_store(store, config.assets_dir.clone()))
    }

    /// Wraps an already constructed store.
    pub fn with_store(store: Arc<dyn CodeStore>, assets_dir: PathBuf) -> Self {
        AppState {
            service: ProgramService::new(store),
            assets_dir: Arc::new(assets_dir),
        }
    }

    /// Creates state over a fresh in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), PathBuf::from(DEFAULT_ASSETS_DIR))
    }
}
