//! # Polar Service
//!
//! Application service implementing `PolarApi` on top of any
//! `PolarRepository`.
//!
//! Reads go straight to the repository. Mutations are check-then-act
//! sequences (exists? then write/move), so they run under a single write
//! lock to keep two concurrent requests from interleaving.

use crate::domain::errors::PolarError;
use crate::domain::id::validate_id;
use crate::domain::polar::Polar;
use crate::ports::inbound::PolarApi;
use crate::ports::outbound::{PolarRepository, Shelf};
use parking_lot::Mutex;
use tracing::info;

/// The polar application service.
pub struct PolarService<R: PolarRepository> {
    repo: R,
    write_lock: Mutex<()>,
}

impl<R: PolarRepository> PolarService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Access the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn required_id(polar: &Polar) -> Result<&str, PolarError> {
        let id = polar.id.as_deref().ok_or(PolarError::IdIsMandatory)?;
        validate_id(id)?;
        Ok(id)
    }

    /// A path id that fails validation cannot name a stored polar.
    fn stored_id(id: &str) -> Result<&str, PolarError> {
        validate_id(id).map_err(|_| PolarError::NotFound(id.to_string()))?;
        Ok(id)
    }

    fn find_on(&self, shelf: Shelf, polar_id: u8) -> Result<Option<Polar>, PolarError> {
        Ok(self
            .repo
            .list(shelf)?
            .into_iter()
            .find(|p| p.polar_id == polar_id))
    }
}

impl<R: PolarRepository> PolarApi for PolarService<R> {
    fn list(&self, archived: Option<bool>) -> Result<Vec<Polar>, PolarError> {
        let shelf = if archived == Some(true) {
            Shelf::Archived
        } else {
            Shelf::Active
        };
        self.repo.list(shelf)
    }

    fn get(&self, id: &str) -> Result<Option<Polar>, PolarError> {
        if validate_id(id).is_err() {
            return Ok(None);
        }
        match self.repo.load(Shelf::Active, id)? {
            Some(polar) => Ok(Some(polar)),
            None => self.repo.load(Shelf::Archived, id),
        }
    }

    fn find_by_polar_id(&self, polar_id: u8) -> Result<Option<Polar>, PolarError> {
        match self.find_on(Shelf::Active, polar_id)? {
            Some(polar) => Ok(Some(polar)),
            None => self.find_on(Shelf::Archived, polar_id),
        }
    }

    fn create(&self, polar: &Polar) -> Result<(), PolarError> {
        let id = Self::required_id(polar)?;
        let _guard = self.write_lock.lock();

        if self.repo.exists(Shelf::Active, id)? {
            return Err(PolarError::AlreadyExists(id.to_string()));
        }
        self.repo.save(Shelf::Active, id, polar)?;
        info!(id, polar_id = polar.polar_id, "Created polar");
        Ok(())
    }

    fn update(&self, id: &str, polar: &Polar) -> Result<(), PolarError> {
        let id = Self::stored_id(id)?;
        let _guard = self.write_lock.lock();

        if !self.repo.exists(Shelf::Active, id)? {
            return Err(PolarError::NotFound(id.to_string()));
        }

        match polar.id.as_deref() {
            Some(new_id) if new_id != id => {
                validate_id(new_id)?;
                if self.repo.exists(Shelf::Active, new_id)? {
                    return Err(PolarError::AlreadyExists(new_id.to_string()));
                }
                // Old file goes only once the new one is on disk.
                self.repo.save(Shelf::Active, new_id, polar)?;
                self.repo.remove(Shelf::Active, id)?;
                info!(old_id = id, new_id, "Renamed polar");
            }
            _ => {
                self.repo.save(Shelf::Active, id, polar)?;
                info!(id, "Updated polar");
            }
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), PolarError> {
        let id = Self::stored_id(id)?;
        let _guard = self.write_lock.lock();

        let shelf = if self.repo.exists(Shelf::Active, id)? {
            Shelf::Active
        } else if self.repo.exists(Shelf::Archived, id)? {
            Shelf::Archived
        } else {
            return Err(PolarError::NotFound(id.to_string()));
        };
        self.repo.remove(shelf, id)?;
        info!(id, %shelf, "Deleted polar");
        Ok(())
    }

    fn archive(&self, id: &str) -> Result<(), PolarError> {
        let id = Self::stored_id(id)?;
        let _guard = self.write_lock.lock();

        if !self.repo.exists(Shelf::Active, id)? {
            return Err(PolarError::NotFound(id.to_string()));
        }
        self.repo.relocate(id, Shelf::Active, Shelf::Archived)?;
        info!(id, "Archived polar");
        Ok(())
    }

    fn restore(&self, id: &str) -> Result<(), PolarError> {
        let id = Self::stored_id(id)?;
        let _guard = self.write_lock.lock();

        if !self.repo.exists(Shelf::Archived, id)? {
            return Err(PolarError::NotFound(id.to_string()));
        }
        if self.repo.exists(Shelf::Active, id)? {
            return Err(PolarError::AlreadyExists(id.to_string()));
        }
        self.repo.relocate(id, Shelf::Archived, Shelf::Active)?;
        info!(id, "Restored polar");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPolarRepository;
    use crate::test_utils::sample_polar;

    fn service() -> PolarService<InMemoryPolarRepository> {
        PolarService::new(InMemoryPolarRepository::new())
    }

    #[test]
    fn test_create_requires_id() {
        let svc = service();
        let mut polar = sample_polar("imoca", 1);
        polar.id = None;
        assert!(matches!(svc.create(&polar), Err(PolarError::IdIsMandatory)));
    }

    #[test]
    fn test_create_rejects_path_like_id() {
        let svc = service();
        let polar = sample_polar("../escape", 1);
        assert!(matches!(
            svc.create(&polar),
            Err(PolarError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_create_twice_conflicts() {
        let svc = service();
        svc.create(&sample_polar("imoca", 1)).unwrap();
        assert!(matches!(
            svc.create(&sample_polar("imoca", 2)),
            Err(PolarError::AlreadyExists(id)) if id == "imoca"
        ));
    }

    #[test]
    fn test_list_switches_shelf() {
        let svc = service();
        svc.create(&sample_polar("imoca", 1)).unwrap();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();

        assert_eq!(svc.list(None).unwrap().len(), 1);
        assert_eq!(svc.list(Some(false)).unwrap().len(), 1);
        let archived = svc.list(Some(true)).unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id.as_deref(), Some("mini"));
        assert!(archived[0].archived);
    }

    #[test]
    fn test_invalid_path_id_is_not_found() {
        let svc = service();
        assert!(svc.get("a.b").unwrap().is_none());
        assert!(svc.get("../etc").unwrap().is_none());
        assert!(matches!(svc.delete("a.b"), Err(PolarError::NotFound(_))));
        assert!(matches!(svc.archive("a/b"), Err(PolarError::NotFound(_))));
        assert!(matches!(svc.restore(""), Err(PolarError::NotFound(_))));
        assert!(matches!(
            svc.update("a.b", &sample_polar("a", 1)),
            Err(PolarError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_falls_back_to_archive() {
        let svc = service();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();

        let polar = svc.get("mini").unwrap().unwrap();
        assert!(polar.archived);
        assert!(svc.get("ghost").unwrap().is_none());
    }

    #[test]
    fn test_find_by_polar_id_prefers_active() {
        let svc = service();
        svc.create(&sample_polar("old", 5)).unwrap();
        svc.archive("old").unwrap();
        svc.create(&sample_polar("new", 5)).unwrap();

        let found = svc.find_by_polar_id(5).unwrap().unwrap();
        assert_eq!(found.id.as_deref(), Some("new"));

        svc.delete("new").unwrap();
        let found = svc.find_by_polar_id(5).unwrap().unwrap();
        assert_eq!(found.id.as_deref(), Some("old"));
        assert!(svc.find_by_polar_id(99).unwrap().is_none());
    }

    #[test]
    fn test_update_in_place() {
        let svc = service();
        svc.create(&sample_polar("imoca", 1)).unwrap();

        let mut polar = sample_polar("imoca", 1);
        polar.max_speed = 40.0;
        svc.update("imoca", &polar).unwrap();
        assert_eq!(svc.get("imoca").unwrap().unwrap().max_speed, 40.0);
    }

    #[test]
    fn test_update_without_body_id_keeps_path_id() {
        let svc = service();
        svc.create(&sample_polar("imoca", 1)).unwrap();

        let mut polar = sample_polar("imoca", 1);
        polar.id = None;
        svc.update("imoca", &polar).unwrap();
        assert_eq!(
            svc.get("imoca").unwrap().unwrap().id.as_deref(),
            Some("imoca")
        );
    }

    #[test]
    fn test_update_renames() {
        let svc = service();
        svc.create(&sample_polar("imoca", 1)).unwrap();

        svc.update("imoca", &sample_polar("imoca60", 1)).unwrap();
        assert!(svc.get("imoca").unwrap().is_none());
        assert!(svc.get("imoca60").unwrap().is_some());
    }

    #[test]
    fn test_update_rename_onto_existing_conflicts() {
        let svc = service();
        svc.create(&sample_polar("a", 1)).unwrap();
        svc.create(&sample_polar("b", 2)).unwrap();

        assert!(matches!(
            svc.update("a", &sample_polar("b", 1)),
            Err(PolarError::AlreadyExists(_))
        ));
        assert!(svc.get("a").unwrap().is_some());
    }

    #[test]
    fn test_update_archived_is_not_found() {
        let svc = service();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();
        assert!(matches!(
            svc.update("mini", &sample_polar("mini", 2)),
            Err(PolarError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_reaches_archive() {
        let svc = service();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();
        svc.delete("mini").unwrap();
        assert!(svc.get("mini").unwrap().is_none());
        assert!(matches!(svc.delete("mini"), Err(PolarError::NotFound(_))));
    }

    #[test]
    fn test_archive_requires_active() {
        let svc = service();
        assert!(matches!(svc.archive("ghost"), Err(PolarError::NotFound(_))));
    }

    #[test]
    fn test_restore_conflicts_with_active() {
        let svc = service();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();
        svc.create(&sample_polar("mini", 3)).unwrap();

        assert!(matches!(
            svc.restore("mini"),
            Err(PolarError::AlreadyExists(_))
        ));
        assert!(matches!(svc.restore("ghost"), Err(PolarError::NotFound(_))));
    }

    #[test]
    fn test_archive_restore_round_trip() {
        let svc = service();
        svc.create(&sample_polar("mini", 2)).unwrap();
        svc.archive("mini").unwrap();
        assert_eq!(svc.repository().len(Shelf::Active), 0);
        svc.restore("mini").unwrap();
        assert_eq!(svc.repository().len(Shelf::Active), 1);
        assert!(!svc.get("mini").unwrap().unwrap().archived);
    }
}
