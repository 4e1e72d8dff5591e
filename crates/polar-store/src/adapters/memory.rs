use crate::domain::errors::PolarError;
use crate::domain::polar::Polar;
use crate::ports::outbound::{PolarRepository, Shelf};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory polar store for unit tests.
///
/// Mirrors `YamlDirectoryRepository` semantics: ids come back sorted, `id`
/// and `archived` are set on the way out.
#[derive(Default)]
pub struct InMemoryPolarRepository {
    shelves: RwLock<BTreeMap<(Shelf, String), Polar>>,
}

impl InMemoryPolarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored polars on a shelf.
    pub fn len(&self, shelf: Shelf) -> usize {
        self.shelves.read().keys().filter(|(s, _)| *s == shelf).count()
    }

    fn stamped(shelf: Shelf, id: &str, polar: &Polar) -> Polar {
        let mut polar = polar.clone();
        polar.id = Some(id.to_string());
        polar.archived = shelf.is_archived();
        polar
    }
}

impl PolarRepository for InMemoryPolarRepository {
    fn list(&self, shelf: Shelf) -> Result<Vec<Polar>, PolarError> {
        Ok(self
            .shelves
            .read()
            .iter()
            .filter(|((s, _), _)| *s == shelf)
            .map(|((s, id), polar)| Self::stamped(*s, id, polar))
            .collect())
    }

    fn load(&self, shelf: Shelf, id: &str) -> Result<Option<Polar>, PolarError> {
        Ok(self
            .shelves
            .read()
            .get(&(shelf, id.to_string()))
            .map(|polar| Self::stamped(shelf, id, polar)))
    }

    fn exists(&self, shelf: Shelf, id: &str) -> Result<bool, PolarError> {
        Ok(self.shelves.read().contains_key(&(shelf, id.to_string())))
    }

    fn save(&self, shelf: Shelf, id: &str, polar: &Polar) -> Result<(), PolarError> {
        self.shelves
            .write()
            .insert((shelf, id.to_string()), polar.clone());
        Ok(())
    }

    fn remove(&self, shelf: Shelf, id: &str) -> Result<(), PolarError> {
        self.shelves
            .write()
            .remove(&(shelf, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| PolarError::NotFound(id.to_string()))
    }

    fn relocate(&self, id: &str, from: Shelf, to: Shelf) -> Result<(), PolarError> {
        let mut shelves = self.shelves.write();
        let polar = shelves
            .remove(&(from, id.to_string()))
            .ok_or_else(|| PolarError::NotFound(id.to_string()))?;
        shelves.insert((to, id.to_string()), polar);
        Ok(())
    }
}
