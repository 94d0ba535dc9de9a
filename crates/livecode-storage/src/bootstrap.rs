//! Start-up guarantee that the default program resolves.

use crate::error::StorageError;
use crate::traits::{CodeStore, STARTER_CODE};

/// Makes sure `load(default_id())` succeeds before the store is served.
///
/// Only a missing default program is written with [`STARTER_CODE`]. Any
/// other load failure is returned as is, so an existing default program is
/// never touched. Safe to call on every start.
pub fn ensure_default(store: &dyn CodeStore) -> Result<(), StorageError> {
    let id = store.default_id();
    match store.load(&id) {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => store.store(&id, STARTER_CODE),
        Err(e) => Err(e),
    }
}
