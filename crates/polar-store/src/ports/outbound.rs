//! # Outbound Ports (Driven Ports)
//!
//! Storage the polar service requires.
//!
//! Production: `YamlDirectoryRepository` (one YAML file per polar)
//! Testing: `InMemoryPolarRepository`

use crate::domain::errors::PolarError;
use crate::domain::polar::Polar;
use std::fmt;

/// Which of the two polar collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shelf {
    /// Polars in service.
    Active,
    /// Retired polars, still readable and restorable.
    Archived,
}

impl Shelf {
    pub fn is_archived(self) -> bool {
        matches!(self, Shelf::Archived)
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shelf::Active => write!(f, "active"),
            Shelf::Archived => write!(f, "archived"),
        }
    }
}

/// Abstract polar storage.
///
/// Ids passed in have already been validated by the service. Polars handed
/// back carry `id` set to their stored id and `archived` set from the shelf.
pub trait PolarRepository: Send + Sync {
    /// All readable polars on a shelf. Unreadable entries are skipped.
    fn list(&self, shelf: Shelf) -> Result<Vec<Polar>, PolarError>;

    /// Load one polar, `None` when absent.
    fn load(&self, shelf: Shelf, id: &str) -> Result<Option<Polar>, PolarError>;

    /// Whether a polar with this id is stored on the shelf.
    fn exists(&self, shelf: Shelf, id: &str) -> Result<bool, PolarError>;

    /// Create or overwrite a polar.
    fn save(&self, shelf: Shelf, id: &str, polar: &Polar) -> Result<(), PolarError>;

    /// Remove a polar. Fails with `NotFound` when absent.
    fn remove(&self, shelf: Shelf, id: &str) -> Result<(), PolarError>;

    /// Move a polar between shelves, keeping its document untouched.
    fn relocate(&self, id: &str, from: Shelf, to: Shelf) -> Result<(), PolarError>;
}

impl<R: PolarRepository + ?Sized> PolarRepository for std::sync::Arc<R> {
    fn list(&self, shelf: Shelf) -> Result<Vec<Polar>, PolarError> {
        (**self).list(shelf)
    }

    fn load(&self, shelf: Shelf, id: &str) -> Result<Option<Polar>, PolarError> {
        (**self).load(shelf, id)
    }

    fn exists(&self, shelf: Shelf, id: &str) -> Result<bool, PolarError> {
        (**self).exists(shelf, id)
    }

    fn save(&self, shelf: Shelf, id: &str, polar: &Polar) -> Result<(), PolarError> {
        (**self).save(shelf, id, polar)
    }

    fn remove(&self, shelf: Shelf, id: &str) -> Result<(), PolarError> {
        (**self).remove(shelf, id)
    }

    fn relocate(&self, id: &str, from: Shelf, to: Shelf) -> Result<(), PolarError> {
        (**self).relocate(id, from, to)
    }
}
