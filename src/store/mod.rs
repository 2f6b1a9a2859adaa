pub mod buckets;
pub mod tracker;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::record::JobRecord;

/// Insertion-ordered id-keyed store, one instance per artifact type (raw
/// index, detailed index, filtered index, date buckets).
pub type Index<T> = IndexMap<String, T>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store exists on disk but fails structural validation. Never
    /// silently replaced with an empty store — that would mask data loss.
    #[error("store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The atomic save could not complete; the previous on-disk version is
    /// still intact and this run is not-yet-persisted for that store.
    #[error("failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load a JSON store. A missing file is an empty store; an unreadable or
/// structurally invalid one surfaces as an error.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Index<T>, StoreError> {
    if !path.exists() {
        return Ok(Index::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let db = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(db)
}

/// Serialize `value` to a temp file in the destination directory, then
/// atomically rename it into place. A reader never sees a partial file and a
/// crash mid-write leaves the previous version intact.
pub fn save_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new("."))).map_err(write_err)?;
    let blob = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;
    tmp.write_all(&blob).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = blob.len(), "store saved");
    Ok(())
}

/// Insert-or-merge a record under its id. On insert the record's
/// `discovery_date` is stamped with `today` (once, never overwritten); on
/// merge the non-empty-wins rule applies field by field. Returns whether the
/// id was previously absent, for "new jobs found today" counts.
pub fn upsert(db: &mut Index<JobRecord>, mut rec: JobRecord, today: NaiveDate) -> bool {
    match db.get_mut(&rec.id) {
        Some(existing) => {
            existing.merge_from(&rec);
            false
        }
        None => {
            if rec.discovery_date.is_none() {
                rec.discovery_date = Some(today);
            }
            info!(id = %rec.id, "new record discovered");
            db.insert(rec.id.clone(), rec);
            true
        }
    }
}
