//! The project catalog.
//!
//! [`ProjectCatalog`] owns the ordered list of project records and mirrors
//! it to a single storage slot after every successful mutation. The
//! in-memory list is the source of truth: a mutation is applied to a
//! candidate copy, written to the slot, and only then committed, so a
//! failed write leaves the catalog unchanged.
//!
//! # Example
//!
//! ```
//! use ecoart::{CategoryFilter, ProjectCatalog, ProjectDraft, Storage};
//!
//! let storage = Storage::open_in_memory()?;
//! let mut catalog = ProjectCatalog::load(storage, "artProjects")?;
//! assert_eq!(catalog.len(), 5);
//!
//! let created = catalog.add(ProjectDraft::new("Test", "X"))?;
//! assert_eq!(created.id, 6);
//!
//! let upcoming: Vec<_> = catalog.filter(&"upcoming".parse()?).collect();
//! assert!(upcoming.iter().all(|p| p.category == "upcoming"));
//!
//! catalog.delete(6)?;
//! assert_eq!(catalog.filter(&CategoryFilter::All).count(), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod defaults;
pub mod stats;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::project::{CategoryFilter, ProjectDraft, ProjectRecord};
use crate::storage::SlotStore;

pub use defaults::default_projects;
pub use stats::ImpactStats;

/// Default name of the slot holding the serialized collection.
pub const DEFAULT_SLOT_KEY: &str = "artProjects";

/// An ordered collection of project records mirrored to a storage slot.
#[derive(Debug)]
pub struct ProjectCatalog<S> {
    store: S,
    slot_key: String,
    records: Vec<ProjectRecord>,
}

impl<S: SlotStore> ProjectCatalog<S> {
    /// Load the catalog from `slot_key` in `store`.
    ///
    /// An absent slot is seeded with [`default_projects`]. A slot that
    /// cannot be parsed, or that holds duplicate ids, is discarded with a
    /// warning and reseeded the same way.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read, or if seeding needs a
    /// write that fails.
    pub fn load(store: S, slot_key: impl Into<String>) -> Result<Self> {
        let mut catalog = Self {
            store,
            slot_key: slot_key.into(),
            records: Vec::new(),
        };
        catalog.reload()?;
        Ok(catalog)
    }

    /// Re-read the slot, replacing the in-memory collection.
    ///
    /// Follows the same seeding rules as [`ProjectCatalog::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or reseeding fails.
    pub fn reload(&mut self) -> Result<()> {
        match self.store.read_slot(&self.slot_key)? {
            Some(raw) => match parse_records(&raw) {
                Ok(records) => {
                    debug!(
                        slot = %self.slot_key,
                        count = records.len(),
                        "Loaded projects"
                    );
                    self.records = records;
                }
                Err(reason) => {
                    warn!(
                        slot = %self.slot_key,
                        %reason,
                        "Discarding unreadable project data, reseeding defaults"
                    );
                    self.commit(default_projects())?;
                }
            },
            None => {
                info!(slot = %self.slot_key, "No saved projects, seeding defaults");
                self.commit(default_projects())?;
            }
        }
        Ok(())
    }

    /// Replace the whole collection with the default seed set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the slot cannot be written.
    pub fn reset(&mut self) -> Result<()> {
        self.commit(default_projects())?;
        info!(slot = %self.slot_key, "Catalog reset to defaults");
        Ok(())
    }

    /// Add a new project and return the stored record.
    ///
    /// The record gets id `max(existing ids) + 1` (or `1` when empty) and is
    /// appended to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the title or description is empty,
    /// or [`Error::Persist`] if the slot cannot be written.
    pub fn add(&mut self, draft: ProjectDraft) -> Result<ProjectRecord> {
        draft.validate()?;

        let id = self.next_id()?;
        let record = ProjectRecord::from_draft(id, draft);

        let mut candidate = self.records.clone();
        candidate.push(record.clone());
        self.commit(candidate)?;

        info!(id, title = %record.title, "Added project");
        Ok(record)
    }

    /// Replace the fields of the project with `id`, keeping its id and
    /// position.
    ///
    /// Returns `Ok(None)` without writing anything if no project has that
    /// id, whatever the draft contains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the title or description is empty,
    /// or [`Error::Persist`] if the slot cannot be written.
    pub fn edit(&mut self, id: u64, draft: ProjectDraft) -> Result<Option<ProjectRecord>> {
        let Some(index) = self.position(id) else {
            debug!(id, "Edit ignored, no such project");
            return Ok(None);
        };

        draft.validate()?;

        let record = ProjectRecord::from_draft(id, draft);
        let mut candidate = self.records.clone();
        candidate[index] = record.clone();
        self.commit(candidate)?;

        info!(id, "Edited project");
        Ok(Some(record))
    }

    /// Remove the project with `id` and return it.
    ///
    /// Returns `Ok(None)` without writing anything if no project has that id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the slot cannot be written.
    pub fn delete(&mut self, id: u64) -> Result<Option<ProjectRecord>> {
        let Some(index) = self.position(id) else {
            debug!(id, "Delete ignored, no such project");
            return Ok(None);
        };

        let mut candidate = self.records.clone();
        let removed = candidate.remove(index);
        self.commit(candidate)?;

        info!(id, "Deleted project");
        Ok(Some(removed))
    }

    /// Records passing `filter`, in insertion order.
    pub fn filter<'a>(
        &'a self,
        filter: &CategoryFilter,
    ) -> impl Iterator<Item = &'a ProjectRecord> + 'a {
        let filter = filter.clone();
        self.records.iter().filter(move |r| filter.matches(r))
    }

    /// Derive impact statistics over every record.
    #[must_use]
    pub fn aggregate(&self) -> ImpactStats {
        stats::aggregate(&self.records)
    }

    fn commit(&mut self, candidate: Vec<ProjectRecord>) -> Result<()> {
        let json = serde_json::to_string(&candidate)?;
        self.store
            .write_slot(&self.slot_key, &json)
            .map_err(|source| Error::persist(self.slot_key.as_str(), source))?;
        self.records = candidate;
        Ok(())
    }
}

impl<S> ProjectCatalog<S> {
    /// Look up a project by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next added project will receive.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the id space is exhausted.
    pub fn next_id(&self) -> Result<u64> {
        match self.records.iter().map(|r| r.id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| Error::internal("project id space exhausted")),
        }
    }

    /// Name of the slot this catalog persists to.
    #[must_use]
    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

fn parse_records(raw: &str) -> std::result::Result<Vec<ProjectRecord>, String> {
    let records: Vec<ProjectRecord> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
        return Err(format!("duplicate project id {}", dup.id));
    }
    Ok(records)
}
