//! Program identifier and code storage for the livecode playground.
//!
//! Provides the [`CodeStore`] trait defining the storage contract that all
//! backends implement, plus [`InMemoryStore`] and [`DirStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: Pid, the validated program identifier
//! - [`traits`]: CodeStore trait, default id, starter snippet, search cap
//! - [`memory`]: InMemoryStore implementation
//! - [`dir`]: DirStore implementation (one `<id>.js` file per program)
//! - [`bootstrap`]: start-up guarantee that the default program exists
//!
//! The crate never logs; every outcome is returned to the caller.

pub mod bootstrap;
pub mod dir;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use bootstrap::ensure_default;
pub use dir::DirStore;
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use traits::{CodeStore, DEFAULT_PID, SEARCH_LIMIT, STARTER_CODE};
pub use types::{Pid, PID_PATTERN};
