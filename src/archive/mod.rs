//! The journal archive: an ordered, newest-first log of committed results,
//! persisted as a single JSON blob and rewritten in full on every mutation.

pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ArchiveError;
use crate::model::AgencyResult;

/// Store seam for the archive. Append-only from the caller's perspective;
/// no update or delete operations are exposed.
pub trait ArchiveStore {
    /// All committed entries, newest first.
    fn entries(&self) -> &[AgencyResult];

    /// Append a result unless an entry with the same timestamp already
    /// exists. Returns `false` on the dedup skip, `true` on a real append.
    fn commit(&mut self, result: AgencyResult) -> Result<bool, ArchiveError>;

    /// Whether an entry with this timestamp has been committed. An entry is
    /// in review mode iff this holds for its timestamp.
    fn contains_timestamp(&self, timestamp: &str) -> bool;
}

/// File-backed archive holding the whole history in one JSON array.
pub struct JsonArchiveStore {
    path: PathBuf,
    entries: Vec<AgencyResult>,
}

impl JsonArchiveStore {
    /// Load the archive from `path`. A missing or unreadable blob degrades
    /// to an empty archive; that recovery is logged, never surfaced.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load_entries(&path);
        Self { path, entries }
    }

    fn load_entries(path: &Path) -> Vec<AgencyResult> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!("failed to read archive at {}: {err}", path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                let parse = ArchiveError::Parse(err.to_string());
                tracing::warn!("starting with an empty archive: {parse}");
                Vec::new()
            }
        }
    }

    fn persist(&self) -> Result<(), ArchiveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let blob = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| ArchiveError::Parse(err.to_string()))?;
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

impl ArchiveStore for JsonArchiveStore {
    fn entries(&self) -> &[AgencyResult] {
        &self.entries
    }

    fn commit(&mut self, result: AgencyResult) -> Result<bool, ArchiveError> {
        if let Some(ts) = result.timestamp.as_deref()
            && self.contains_timestamp(ts)
        {
            return Ok(false);
        }

        self.entries.insert(0, result);
        if let Err(err) = self.persist() {
            // Keep memory and disk consistent so a retry is a real append,
            // not a dedup skip of an entry that never reached disk.
            self.entries.remove(0);
            return Err(err);
        }
        Ok(true)
    }

    fn contains_timestamp(&self, timestamp: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.timestamp.as_deref() == Some(timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassificationScores, Domain};
    use tempfile::TempDir;

    fn entry(ts: &str, dominant: Domain) -> AgencyResult {
        AgencyResult {
            classification: ClassificationScores {
                my_domain: 20,
                others_domain: 50,
                life_domain: 30,
            },
            dominant_domain: dominant,
            one_sentence_reason: "reason".into(),
            recommended_action: "action".into(),
            optional_reframe: "reframe".into(),
            timestamp: Some(ts.into()),
            original_input: Some("input".into()),
        }
    }

    fn store() -> (TempDir, JsonArchiveStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonArchiveStore::open(dir.path().join("archive.json"));
        (dir, store)
    }

    #[test]
    fn open_on_missing_file_starts_empty() {
        let (_dir, store) = store();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn open_on_corrupt_blob_recovers_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archive.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = JsonArchiveStore::open(&path);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn commit_keeps_newest_first() {
        let (_dir, mut store) = store();
        store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine))
            .unwrap();
        store
            .commit(entry("2026-08-28T09:00:00+00:00", Domain::Life))
            .unwrap();

        assert_eq!(store.entries().len(), 2);
        assert_eq!(
            store.entries()[0].timestamp.as_deref(),
            Some("2026-08-28T09:00:00+00:00")
        );
    }

    #[test]
    fn commit_is_idempotent_on_timestamp() {
        let (_dir, mut store) = store();
        let first = store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine))
            .unwrap();
        let second = store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine))
            .unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn failed_persist_rolls_back_the_in_memory_insert() {
        let dir = TempDir::new().unwrap();
        // A plain file where the archive directory should be makes every
        // write fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("archive.json");

        let mut store = JsonArchiveStore::open(&path);
        let result = store.commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine));

        assert!(result.is_err());
        assert!(store.entries().is_empty());
        assert!(!store.contains_timestamp("2026-08-28T08:00:00+00:00"));

        // Once the path is writable again, the retry is a real append.
        std::fs::remove_file(&blocker).unwrap();
        let appended = store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine))
            .unwrap();
        assert!(appended);
        assert_eq!(JsonArchiveStore::open(&path).entries().len(), 1);
    }

    #[test]
    fn every_commit_rewrites_the_blob() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archive.json");

        let mut store = JsonArchiveStore::open(&path);
        store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Others))
            .unwrap();

        let reloaded = JsonArchiveStore::open(&path);
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn contains_timestamp_tracks_committed_entries() {
        let (_dir, mut store) = store();
        store
            .commit(entry("2026-08-28T08:00:00+00:00", Domain::Mine))
            .unwrap();

        assert!(store.contains_timestamp("2026-08-28T08:00:00+00:00"));
        assert!(!store.contains_timestamp("2026-08-28T09:00:00+00:00"));
    }
}
