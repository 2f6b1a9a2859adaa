use indexmap::IndexMap;

use crate::record::JobRecord;

/// Bucket key for records whose classification date never parsed. They are
/// partitioned, not dropped.
pub const UNKNOWN_BUCKET: &str = "unknown-date";

/// Which date classifies a record into its bucket: posting date for full
/// scrapes, discovery date for incremental ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifyBy {
    #[default]
    DatePosted,
    DiscoveryDate,
}

/// Groups records into per-date partitions. Bucket assignment is
/// first-write-wins: an id that already has a bucket keeps it even if later
/// reprocessing would classify the record differently.
#[derive(Debug, Default)]
pub struct DateBucketOrganizer {
    classify_by: ClassifyBy,
    assigned: IndexMap<String, String>,
}

impl DateBucketOrganizer {
    pub fn new(classify_by: ClassifyBy) -> Self {
        DateBucketOrganizer {
            classify_by,
            assigned: IndexMap::new(),
        }
    }

    /// Rebuild prior id → bucket assignments, e.g. from buckets already on
    /// disk, so reruns honor first-write-wins across process restarts.
    pub fn with_assignments(
        classify_by: ClassifyBy,
        assigned: IndexMap<String, String>,
    ) -> Self {
        DateBucketOrganizer {
            classify_by,
            assigned,
        }
    }

    /// The bucket key for this record, recording the assignment on first
    /// sight. ISO calendar date (`YYYY-MM-DD`) or [`UNKNOWN_BUCKET`].
    pub fn assign(&mut self, rec: &JobRecord) -> String {
        if let Some(existing) = self.assigned.get(&rec.id) {
            return existing.clone();
        }
        let date = match self.classify_by {
            ClassifyBy::DatePosted => rec.date_posted,
            ClassifyBy::DiscoveryDate => rec.discovery_date,
        };
        let key = date
            .map(|d| d.to_string())
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        self.assigned.insert(rec.id.clone(), key.clone());
        key
    }

    /// Partition records into bucket key → record ids, in input order.
    pub fn organize<'a, I>(&mut self, records: I) -> IndexMap<String, Vec<String>>
    where
        I: IntoIterator<Item = &'a JobRecord>,
    {
        let mut out: IndexMap<String, Vec<String>> = IndexMap::new();
        for rec in records {
            let key = self.assign(rec);
            out.entry(key).or_default().push(rec.id.clone());
        }
        out
    }

    pub fn assignments(&self) -> &IndexMap<String, String> {
        &self.assigned
    }
}
