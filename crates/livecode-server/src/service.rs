//! Program service: the one place request handlers reach the code store.
//!
//! [`ProgramService`] turns raw path segments into validated [`Pid`]s before
//! any store call and implements the request-level behaviors that sit on
//! top of the store contract (create-on-first-view, list-or-search).

use std::sync::Arc;

use livecode_storage::{CodeStore, Pid, StorageError, STARTER_CODE};

use crate::error::ApiError;

/// Shared, backend-agnostic access to stored programs.
#[derive(Clone)]
pub struct ProgramService {
    store: Arc<dyn CodeStore>,
}

impl ProgramService {
    /// Wraps an already bootstrapped store.
    pub fn new(store: Arc<dyn CodeStore>) -> Self {
        ProgramService { store }
    }

    /// Validates a raw path segment.
    pub fn parse_id(raw: &str) -> Result<Pid, ApiError> {
        Ok(Pid::parse(raw)?)
    }

    /// The id bare requests are redirected to.
    pub fn default_id(&self) -> Pid {
        self.store.default_id()
    }

    /// Returns the program's source.
    pub fn source(&self, raw: &str) -> Result<String, ApiError> {
        let id = Self::parse_id(raw)?;
        Ok(self.store.load(&id)?)
    }

    /// Opens a program for editing, creating it from the starter snippet
    /// when nothing is stored under `raw` yet.
    pub fn open_for_edit(&self, raw: &str) -> Result<Pid, ApiError> {
        let id = Self::parse_id(raw)?;
        match self.store.load(&id) {
            Ok(_) => {}
            Err(StorageError::NotFound(_)) => {
                tracing::info!(program = %id, "creating program on first view");
                self.store.store(&id, STARTER_CODE)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(id)
    }

    /// Replaces the program's source.
    pub fn save(&self, raw: &str, content: &str) -> Result<Pid, ApiError> {
        let id = Self::parse_id(raw)?;
        self.store.store(&id, content)?;
        tracing::debug!(program = %id, bytes = content.len(), "program saved");
        Ok(id)
    }

    /// All ids when `query` is absent or blank, search results otherwise.
    pub fn programs(&self, query: Option<&str>) -> Result<Vec<Pid>, ApiError> {
        match query {
            Some(q) if !q.is_empty() => Ok(self.store.search(q)?),
            _ => Ok(self.store.list()?),
        }
    }
}
