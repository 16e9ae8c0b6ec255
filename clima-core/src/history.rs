use directories::ProjectDirs;
use std::{
    fs,
    path::PathBuf,
    sync::Mutex,
};
use tracing::warn;

/// Maximum number of remembered city names.
pub const HISTORY_CAP: usize = 5;

/// Backing store for the search history list.
///
/// Implementations never raise: a failed read degrades to an empty list and
/// a failed write is logged and dropped. This matches the history's role as
/// a convenience, not a source of truth.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Vec<String>;
    fn save(&self, entries: &[String]);
}

/// JSON-file-backed store under the platform data directory.
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Store at the default platform location.
    pub fn new() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow::anyhow!("Could not determine platform data directory"))?;

        Ok(Self { path: dirs.data_dir().join("history.json") })
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> Vec<String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            // Missing file is the normal first-run case.
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                // Corrupt history is not worth failing a lookup over; it
                // gets overwritten on the next successful record.
                warn!(path = %self.path.display(), error = %e, "Malformed history file, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[String]) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create history directory");
                return;
            }
        }

        match serde_json::to_string(entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!(path = %self.path.display(), error = %e, "Failed to write history file");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize history"),
        }
    }
}

/// In-memory store, used in tests and by callers without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<String>>,
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, entries: &[String]) {
        match self.entries.lock() {
            Ok(mut guard) => *guard = entries.to_vec(),
            Err(poisoned) => *poisoned.into_inner() = entries.to_vec(),
        }
    }
}

/// Bounded most-recent-first list of searched city names.
///
/// The read-modify-write in [`SearchHistory::record`] is serialized behind a
/// mutex so concurrent lookups cannot lose entries.
pub struct SearchHistory {
    store: Box<dyn HistoryStore>,
    guard: Mutex<()>,
}

impl std::fmt::Debug for SearchHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHistory").finish_non_exhaustive()
    }
}

impl SearchHistory {
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        Self { store, guard: Mutex::new(()) }
    }

    /// Remember `name` as the most recent search.
    ///
    /// A name that is already present keeps its position; the list is
    /// otherwise pushed from the front and truncated to [`HISTORY_CAP`].
    pub fn record(&self, name: &str) {
        let _guard = match self.guard.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut entries = self.store.load();
        if entries.iter().any(|e| e == name) {
            return;
        }

        entries.insert(0, name.to_string());
        entries.truncate(HISTORY_CAP);
        self.store.save(&entries);
    }

    /// The persisted list, most recent first; empty when nothing was
    /// recorded yet.
    pub fn entries(&self) -> Vec<String> {
        self.store.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> SearchHistory {
        SearchHistory::new(Box::new(MemoryHistoryStore::default()))
    }

    #[test]
    fn empty_by_default() {
        let history = in_memory();
        assert!(history.entries().is_empty());
    }

    #[test]
    fn records_most_recent_first() {
        let history = in_memory();
        history.record("Madrid");
        history.record("Lima");

        assert_eq!(history.entries(), vec!["Lima", "Madrid"]);
    }

    #[test]
    fn duplicate_record_is_a_noop() {
        let history = in_memory();
        history.record("Madrid");
        history.record("Madrid");

        assert_eq!(history.entries(), vec!["Madrid"]);
    }

    #[test]
    fn recording_present_name_keeps_its_position() {
        let history = in_memory();
        history.record("Madrid");
        history.record("Lima");
        history.record("Madrid");

        assert_eq!(history.entries(), vec!["Lima", "Madrid"]);
    }

    #[test]
    fn truncates_to_five_most_recent() {
        let history = in_memory();
        for city in ["Madrid", "Lima", "Bogotá", "Quito", "Santiago", "Montevideo"] {
            history.record(city);
        }

        assert_eq!(
            history.entries(),
            vec!["Montevideo", "Santiago", "Quito", "Bogotá", "Lima"]
        );
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileHistoryStore::at(dir.path().join("history.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").expect("write");

        let store = FileHistoryStore::at(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("history.json");

        let history = SearchHistory::new(Box::new(FileHistoryStore::at(path.clone())));
        history.record("Madrid");
        history.record("Lima");

        let reopened = SearchHistory::new(Box::new(FileHistoryStore::at(path)));
        assert_eq!(reopened.entries(), vec!["Lima", "Madrid"]);
    }
}
