//! The [`CodeStore`] trait defining the storage contract for program text.
//!
//! All backends ([`InMemoryStore`](crate::InMemoryStore),
//! [`DirStore`](crate::DirStore), and any future networked store) implement
//! this trait, so the HTTP layer holds an `Arc<dyn CodeStore>` and never
//! branches on which medium is in use.

use crate::error::StorageError;
use crate::types::Pid;

/// Well-known identifier every store resolves after bootstrap.
pub const DEFAULT_PID: &str = "starter";

/// Maximum number of identifiers returned by [`CodeStore::search`].
pub const SEARCH_LIMIT: usize = 20;

/// Content stored under [`DEFAULT_PID`] when a store starts empty.
pub const STARTER_CODE: &str = "function setup() {
  createCanvas(400, 400);
}

function draw() {
  background(220);
}
";

/// The storage contract for program text keyed by [`Pid`].
///
/// Methods take `&self`: each backend carries its own synchronization so
/// one instance can be shared by every request task. The trait is
/// synchronous; every call is a single bounded read or write.
pub trait CodeStore: Send + Sync {
    /// Returns the well-known default identifier ("starter").
    fn default_id(&self) -> Pid;

    /// Returns the current content for `id`.
    ///
    /// Fails with [`StorageError::NotFound`] when nothing is stored under
    /// `id`. Never creates an entry.
    fn load(&self, id: &Pid) -> Result<String, StorageError>;

    /// Creates or replaces the content for `id`.
    ///
    /// Last write wins. Durable backends finish the write before returning.
    fn store(&self, id: &Pid, content: &str) -> Result<(), StorageError>;

    /// All known identifiers, sorted, without duplicates.
    ///
    /// Recomputed on every call.
    fn list(&self) -> Result<Vec<Pid>, StorageError>;

    /// Identifiers whose own text or current content contains `query`.
    ///
    /// Case-sensitive literal substring match, sorted, at most
    /// [`SEARCH_LIMIT`] entries. A best-effort snapshot under concurrent
    /// writes.
    fn search(&self, query: &str) -> Result<Vec<Pid>, StorageError>;
}

/// The default identifier as a [`Pid`].
pub fn default_pid() -> Pid {
    Pid::parse(DEFAULT_PID).unwrap_or_else(|e| panic!("DEFAULT_PID is well-formed: {e}"))
}

/// True when `id` or `content` contains `query` as a literal substring.
pub(crate) fn matches_query(id: &Pid, content: &str, query: &str) -> bool {
    id.as_str().contains(query) || content.contains(query)
}

/// Sorts matched identifiers and truncates them to [`SEARCH_LIMIT`].
pub(crate) fn finish_search(mut hits: Vec<Pid>) -> Vec<Pid> {
    hits.sort();
    hits.dedup();
    hits.truncate(SEARCH_LIMIT);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: &str) -> Pid {
        Pid::parse(raw).unwrap()
    }

    #[test]
    fn default_pid_is_starter() {
        assert_eq!(default_pid().as_str(), "starter");
    }

    #[test]
    fn starter_code_is_non_empty() {
        assert!(STARTER_CODE.contains("function setup()"));
        assert!(STARTER_CODE.contains("function draw()"));
    }

    #[test]
    fn match_on_id_or_content() {
        assert!(matches_query(&pid("foo1"), "", "foo"));
        assert!(matches_query(&pid("a"), "let foo = 1;", "foo"));
        assert!(!matches_query(&pid("a"), "bar", "foo"));
        assert!(!matches_query(&pid("a"), "FOO", "foo"));
    }

    #[test]
    fn finish_search_sorts_and_caps() {
        let hits: Vec<Pid> = (0..30).rev().map(|i| pid(&format!("p{i:02}"))).collect();
        let out = finish_search(hits);
        assert_eq!(out.len(), SEARCH_LIMIT);
        assert_eq!(out[0].as_str(), "p00");
        assert_eq!(out[SEARCH_LIMIT - 1].as_str(), "p19");
    }
}
