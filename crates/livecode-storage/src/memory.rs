//! In-memory implementation of [`CodeStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests, demos, and any
//! deployment without a state directory. Data lives for the process
//! lifetime only. The map is a [`DashMap`], so single-key operations are
//! linearizable and `list`/`search` see a best-effort snapshot of the
//! shards they walk.

use dashmap::DashMap;

use crate::error::StorageError;
use crate::traits::{default_pid, finish_search, matches_query, CodeStore, STARTER_CODE};
use crate::types::Pid;

/// Volatile program store.
#[derive(Debug)]
pub struct InMemoryStore {
    programs: DashMap<Pid, String>,
}

impl InMemoryStore {
    /// Creates a store seeded with the starter program.
    pub fn new() -> Self {
        let programs = DashMap::new();
        programs.insert(default_pid(), STARTER_CODE.to_string());
        InMemoryStore { programs }
    }

    /// Number of stored programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// True when no programs are stored.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeStore for InMemoryStore {
    fn default_id(&self) -> Pid {
        default_pid()
    }

    fn load(&self, id: &Pid) -> Result<String, StorageError> {
        self.programs
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn store(&self, id: &Pid, content: &str) -> Result<(), StorageError> {
        self.programs.insert(id.clone(), content.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Pid>, StorageError> {
        let mut ids: Vec<Pid> = self.programs.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }

    fn search(&self, query: &str) -> Result<Vec<Pid>, StorageError> {
        let hits = self
            .programs
            .iter()
            .filter(|e| matches_query(e.key(), e.value(), query))
            .map(|e| e.key().clone())
            .collect();
        Ok(finish_search(hits))
    }
}
