use indexmap::IndexSet;
use tracing::info;

/// The set of identifiers previous runs already collected, and the stopping
/// signal for bounded incremental crawls.
///
/// The source lists newest postings first, so the first already-known id a
/// forward scan encounters means everything beyond it has been seen. New ids
/// are merged only after a successful save — never before — so a crash
/// between discovery and persistence loses no state.
#[derive(Debug, Default, Clone)]
pub struct IncrementalIdTracker {
    known: IndexSet<String>,
}

impl IncrementalIdTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted id list.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IncrementalIdTracker {
            known: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// True once a scanned id is already known.
    pub fn should_stop(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Add freshly discovered ids to the known set. Call after the records
    /// behind them are durably saved.
    pub fn merge<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.known.len();
        self.known.extend(ids.into_iter().map(Into::into));
        let added = self.known.len() - before;
        if added > 0 {
            info!(added, total = self.known.len(), "known-id set grew");
        }
    }

    /// Known ids in insertion order, for persisting.
    pub fn known(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
