//! Storage layer for taskform.
//!
//! This module provides the JSON-file record store: the whole collection is
//! held in memory and every mutation rewrites the data file in full.

pub mod codec;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::record::{Record, RecordFields, RecordId};

/// Record store mirrored to a single JSON file.
///
/// A `RecordStore` is the only writer of its file. Mutating operations take
/// `&mut self`, so writes are serialized by ownership.
///
/// Mutations apply to memory first and then persist. When persisting fails the
/// error is logged and returned, but the in-memory change stays: memory and
/// disk diverge until the next successful write.
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the data file.
    path: PathBuf,
    /// Records in insertion order.
    records: Vec<Record>,
    /// Write indented JSON.
    pretty: bool,
}

impl RecordStore {
    /// Create an empty store for `path` without touching the file system.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: Vec::new(),
            pretty: false,
        }
    }

    /// Create a store for `path` and load whatever is persisted there.
    ///
    /// A failed load leaves the store empty. The failure is logged, never
    /// returned, so startup always succeeds.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let mut store = Self::new(path);
        if let Err(e) = store.load() {
            warn!("Starting with an empty collection: {e}");
        }
        store
    }

    /// Select indented (`true`) or compact (`false`) JSON for writes.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get the first record with the given id.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the in-memory collection with the data file's contents.
    ///
    /// A missing file yields an empty collection. On a read or parse error the
    /// collection is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if the file cannot be read and [`Error::Parse`]
    /// if it does not hold a JSON array of records.
    pub fn load(&mut self) -> Result<&[Record]> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                self.records.clear();
                return Ok(&self.records);
            }
            Err(source) => {
                error!("Failed to read {}: {}", self.path.display(), source);
                return Err(Error::Load {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match codec::decode(&bytes) {
            Ok(records) => {
                debug!(
                    "Loaded {} records from {}",
                    records.len(),
                    self.path.display()
                );
                self.records = records;
                Ok(&self.records)
            }
            Err(source) => {
                error!("Failed to parse {}: {}", self.path.display(), source);
                Err(Error::Parse {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Append a new record built from `fields` and persist.
    ///
    /// The id is the current time in milliseconds, bumped past the newest
    /// existing id if the clock has not moved on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] if the newest id is already `i64::MAX`;
    /// nothing is appended then. Returns an error if persisting fails; the
    /// record is still appended in memory.
    pub fn append(&mut self, fields: RecordFields) -> Result<Record> {
        let latest = self.latest_id();
        let Some(id) = RecordId::generate(latest) else {
            error!("No id left after {:?}, record not appended", latest);
            return Err(Error::IdsExhausted);
        };
        let record = Record::new(id, fields);
        self.records.push(record.clone());
        info!("Appended record {}", id);

        self.persist()?;
        Ok(record)
    }

    /// Overwrite the fields of the first record with id `id` and persist.
    ///
    /// Returns the updated record, or `None` if no record matched. The file is
    /// rewritten either way.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the update still applies in memory.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<Option<Record>> {
        let updated = match self.records.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                *slot = slot.with_fields(fields);
                info!("Updated record {}", id);
                Some(slot.clone())
            }
            None => {
                warn!("Update skipped, no record with id {}", id);
                None
            }
        };

        self.persist()?;
        Ok(updated)
    }

    /// Remove every record with id `id` and persist.
    ///
    /// Returns how many records were removed. Deleting an absent id is a no-op
    /// apart from the rewrite.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the removal still applies in memory.
    pub fn delete(&mut self, id: RecordId) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = before - self.records.len();

        if removed > 0 {
            info!("Deleted {} record(s) with id {}", removed, id);
        } else {
            debug!("Delete found no record with id {}", id);
        }

        self.persist()?;
        Ok(removed)
    }

    /// Write the full collection to the data file.
    ///
    /// Creates parent directories as needed. The new contents go to a sibling
    /// temporary file which is then renamed over the data file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the collection
    /// cannot be serialized, or the file cannot be written.
    pub fn persist(&self) -> Result<()> {
        let result = self.write_file();
        if let Err(e) = &result {
            error!("Persist failed, memory and disk now differ: {e}");
        }
        result
    }

    fn write_file(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let bytes = codec::encode(&self.records, self.pretty)?;
        let tmp = self.temp_path();

        let written = std::fs::write(&tmp, &bytes)
            .and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(Error::Persist {
                path: self.path.clone(),
                source,
            });
        }

        debug!(
            "Wrote {} records ({} bytes) to {}",
            self.records.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn latest_id(&self) -> Option<RecordId> {
        self.records.iter().map(|r| r.id).max()
    }

    /// Summarize the collection and the data file.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let file_size_bytes = std::fs::metadata(&self.path).map(|m| m.len()).ok();
        let created = self.records.iter().filter_map(|r| r.id.created_at());

        StoreStats {
            total_records: self.records.len(),
            oldest_record: created.clone().min(),
            newest_record: created.max(),
            file_size_bytes,
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of records held in memory.
    pub total_records: usize,
    /// Creation time of the oldest record.
    pub oldest_record: Option<DateTime<Utc>>,
    /// Creation time of the newest record.
    pub newest_record: Option<DateTime<Utc>>,
    /// Size of the data file, or `None` if it does not exist yet.
    pub file_size_bytes: Option<u64>,
}
