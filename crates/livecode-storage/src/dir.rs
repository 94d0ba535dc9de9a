//! Directory-backed implementation of [`CodeStore`].
//!
//! [`DirStore`] keeps one plain-text file per program at
//! `<dir>/<id>.js`. There is no manifest or sidecar: the directory listing
//! is the index, so the store is rebuilt from disk on every process start.
//!
//! Writes go to a temporary file in the same directory which is renamed
//! over the target once fully written, so a concurrent reader sees either
//! the old or the new content, never a torn file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::bootstrap::ensure_default;
use crate::error::StorageError;
use crate::traits::{default_pid, finish_search, CodeStore};
use crate::types::Pid;

/// File suffix for stored programs.
pub const PROGRAM_EXT: &str = ".js";

/// Durable program store rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Opens a store rooted at `dir`, creating the directory if needed and
    /// making sure the starter program exists.
    ///
    /// An existing starter file is left untouched, even when it cannot be
    /// read; that failure is returned instead.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::at(dir);
        fs::create_dir_all(&store.dir).map_err(|e| StorageError::io(&store.dir, e))?;
        ensure_default(&store)?;
        Ok(store)
    }

    /// A store rooted at `dir` with no start-up side effects: the directory
    /// is neither created nor bootstrapped. For read-only inspection.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        DirStore { dir: dir.into() }
    }

    /// The directory programs are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `id`.
    pub fn path(&self, id: &Pid) -> PathBuf {
        self.dir.join(format!("{id}{PROGRAM_EXT}"))
    }
}

impl CodeStore for DirStore {
    fn default_id(&self) -> Pid {
        default_pid()
    }

    fn load(&self, id: &Pid) -> Result<String, StorageError> {
        let path = self.path(id);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(id.to_string())),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn store(&self, id: &Pid, content: &str) -> Result<(), StorageError> {
        let path = self.path(id);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
                .map_err(|e| StorageError::io(tmp.path(), e))?;
        }

        // On failure the temp file is removed when `PersistError` drops.
        tmp.persist(&path)
            .map_err(|e| StorageError::io(&path, e.error))?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Pid>, StorageError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(stem) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(PROGRAM_EXT))
                .map(str::to_string)
            else {
                continue;
            };
            // Files whose stem is not a valid id cannot be addressed; skip them.
            if let Ok(id) = Pid::parse(&stem) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn search(&self, query: &str) -> Result<Vec<Pid>, StorageError> {
        let mut hits = Vec::new();
        for id in self.list()? {
            if id.as_str().contains(query) {
                hits.push(id);
                continue;
            }
            // Raw bytes, so a file that is not valid UTF-8 can still match.
            // Files that cannot be read are skipped like unaddressable ones.
            let Ok(content) = fs::read(self.path(&id)) else {
                continue;
            };
            if contains_bytes(&content, query.as_bytes()) {
                hits.push(id);
            }
        }
        Ok(finish_search(hits))
    }
}

/// True when `needle` occurs in `haystack`.
fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SEARCH_LIMIT, STARTER_CODE};

    fn pid(raw: &str) -> Pid {
        Pid::parse(raw).unwrap()
    }

    fn names(ids: Vec<Pid>) -> Vec<String> {
        ids.into_iter().map(String::from).collect()
    }

    #[test]
    fn test_open_creates_starter() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        let path = tmp.path().join("starter.js");
        assert!(path.is_file());
        assert_eq!(fs::read_to_string(path).unwrap(), STARTER_CODE);
        assert_eq!(store.load(&store.default_id()).unwrap(), STARTER_CODE);
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("state").join("programs");
        let store = DirStore::open(&nested).unwrap();
        assert_eq!(store.dir(), nested.as_path());
        assert!(nested.join("starter.js").is_file());
    }

    #[test]
    fn test_open_keeps_existing_starter() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("starter.js"), "// mine").unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        assert_eq!(store.load(&pid("starter")).unwrap(), "// mine");
    }

    #[test]
    fn test_store_writes_one_file_per_program() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("demo"), "line(0, 0, 10, 10);\n").unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("demo.js")).unwrap(),
            "line(0, 0, 10, 10);\n"
        );

        store.store(&pid("demo"), "x").unwrap();
        assert_eq!(store.load(&pid("demo")).unwrap(), "x");

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| !n.ends_with(PROGRAM_EXT))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_store_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("demo"), "x").unwrap();
        let mode = fs::metadata(tmp.path().join("demo.js")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        assert!(store.load(&pid("ghost")).unwrap_err().is_not_found());
        assert!(!tmp.path().join("ghost.js").exists());
    }

    #[test]
    fn test_list_ignores_foreign_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("b"), "").unwrap();
        store.store(&pid("a"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("9bad.js"), "").unwrap();
        fs::create_dir(tmp.path().join("sub.js")).unwrap();
        fs::write(tmp.path().join("sub.js").join("nested.js"), "").unwrap();

        assert_eq!(names(store.list().unwrap()), vec!["a", "b", "starter"]);
    }

    #[test]
    fn test_search() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("a"), "foo").unwrap();
        store.store(&pid("b"), "bar").unwrap();
        store.store(&pid("c"), "foobar").unwrap();
        assert_eq!(names(store.search("foo").unwrap()), vec!["a", "c"]);
        assert_eq!(names(store.search("star").unwrap()), vec!["starter"]);
        assert!(store.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_caps_results() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        for i in 0..25 {
            store.store(&pid(&format!("s{i:02}")), "noise();").unwrap();
        }
        let hits = store.search("noise").unwrap();
        assert_eq!(hits.len(), SEARCH_LIMIT);
        assert_eq!(hits[0].as_str(), "s00");
    }

    #[test]
    fn test_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let store = DirStore::open(tmp.path()).unwrap();
            store.store(&pid("demo"), "ellipse(50, 50, 80, 80);").unwrap();
        }
        let reopened = DirStore::open(tmp.path()).unwrap();
        assert_eq!(reopened.load(&pid("demo")).unwrap(), "ellipse(50, 50, 80, 80);");
        assert_eq!(names(reopened.list().unwrap()), vec!["demo", "starter"]);
    }

    #[test]
    fn test_open_never_overwrites_unreadable_starter() {
        let tmp = tempfile::tempdir().unwrap();
        let legacy: &[u8] = b"// legacy \xff\xfe bytes\n";
        fs::write(tmp.path().join("starter.js"), legacy).unwrap();

        let err = DirStore::open(tmp.path()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }), "got {err:?}");
        assert_eq!(fs::read(tmp.path().join("starter.js")).unwrap(), legacy);
    }

    #[test]
    fn test_search_tolerates_non_utf8_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("good"), "foo").unwrap();
        fs::write(tmp.path().join("bad.js"), b"\xff").unwrap();
        fs::write(tmp.path().join("latin.js"), b"foo \xe9t\xe9").unwrap();

        assert_eq!(names(store.search("foo").unwrap()), vec!["good", "latin"]);
        assert_eq!(names(store.search("bad").unwrap()), vec!["bad"]);
        assert_eq!(names(store.list().unwrap()), vec!["bad", "good", "latin", "starter"]);
    }

    #[test]
    fn test_contains_bytes() {
        assert!(contains_bytes(b"abc", b""));
        assert!(contains_bytes(b"\xffabc", b"bc"));
        assert!(!contains_bytes(b"ab", b"abc"));
        assert!(!contains_bytes(b"ABC", b"abc"));
    }

    #[test]
    fn test_failed_store_surfaces_io_and_leaves_target() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        // A directory squatting on the target path makes the final rename fail.
        let target = tmp.path().join("blocked.js");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "kept").unwrap();

        let err = store.store(&pid("blocked"), "new").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }), "got {err:?}");
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "kept");

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| !n.ends_with(PROGRAM_EXT))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_store_into_read_only_dir_keeps_old_content() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let store = DirStore::open(tmp.path()).unwrap();
        store.store(&pid("demo"), "old").unwrap();

        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o555)).unwrap();
        // Privileged users ignore directory permissions; nothing to check then.
        let writable = fs::write(tmp.path().join(".writable-check"), "").is_ok();
        let result = store.store(&pid("demo"), "new");
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o755)).unwrap();
        if writable {
            return;
        }

        assert!(matches!(result, Err(StorageError::Io { .. })), "got {result:?}");
        assert_eq!(store.load(&pid("demo")).unwrap(), "old");
    }

    #[test]
    fn test_at_has_no_side_effects() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("absent");
        let store = DirStore::at(&missing);
        assert!(!missing.exists());
        assert!(matches!(store.list(), Err(StorageError::Io { .. })));

        let empty = DirStore::at(tmp.path());
        assert!(empty.load(&pid("starter")).unwrap_err().is_not_found());
        assert!(empty.list().unwrap().is_empty());
        assert!(!tmp.path().join("starter.js").exists());
    }
}
