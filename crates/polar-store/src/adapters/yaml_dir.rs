use crate::domain::errors::PolarError;
use crate::domain::id::{file_id, file_name};
use crate::domain::polar::Polar;
use crate::ports::outbound::{PolarRepository, Shelf};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory-backed polar store: one `<id>.yaml` document per polar.
///
/// Active and archived polars live in two separate directories, both
/// created on construction. Writes go through a temp file and a rename so a
/// crash never leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct YamlDirectoryRepository {
    polars_dir: PathBuf,
    archived_dir: PathBuf,
}

impl YamlDirectoryRepository {
    /// Open (and create if needed) the two polar directories.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        polars_dir: P,
        archived_dir: Q,
    ) -> Result<Self, PolarError> {
        let polars_dir = polars_dir.into();
        let archived_dir = archived_dir.into();
        Self::ensure_dir(&polars_dir)?;
        Self::ensure_dir(&archived_dir)?;
        debug!(
            polars_dir = %polars_dir.display(),
            archived_dir = %archived_dir.display(),
            "Opened polar directories"
        );
        Ok(Self {
            polars_dir,
            archived_dir,
        })
    }

    pub fn polars_dir(&self) -> &Path {
        &self.polars_dir
    }

    pub fn archived_dir(&self) -> &Path {
        &self.archived_dir
    }

    fn ensure_dir(dir: &Path) -> Result<(), PolarError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| PolarError::io(dir, e))
        } else if !dir.is_dir() {
            Err(PolarError::io(
                dir,
                std::io::Error::new(ErrorKind::Other, "not a directory"),
            ))
        } else {
            Ok(())
        }
    }

    fn dir(&self, shelf: Shelf) -> &Path {
        match shelf {
            Shelf::Active => &self.polars_dir,
            Shelf::Archived => &self.archived_dir,
        }
    }

    fn path(&self, shelf: Shelf, id: &str) -> PathBuf {
        self.dir(shelf).join(file_name(id))
    }

    fn read_polar(path: &Path) -> Result<Option<Polar>, PolarError> {
        let text = fs::read_to_string(path).map_err(|e| PolarError::io(path, e))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_yaml::from_str(&text).map_err(|e| PolarError::yaml(path, e))
    }

    fn write_polar(path: &Path, polar: &Polar) -> Result<(), PolarError> {
        let text = serde_yaml::to_string(polar).map_err(|e| PolarError::yaml(path, e))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

        let mut file = fs::File::create(&temp_path).map_err(|e| PolarError::io(&temp_path, e))?;
        file.write_all(text.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| PolarError::io(&temp_path, e))?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PolarError::io(path, e)
        })
    }

    fn not_found_or_io(id: &str, path: &Path, e: std::io::Error) -> PolarError {
        if e.kind() == ErrorKind::NotFound {
            PolarError::NotFound(id.to_string())
        } else {
            PolarError::io(path, e)
        }
    }
}

impl PolarRepository for YamlDirectoryRepository {
    fn list(&self, shelf: Shelf) -> Result<Vec<Polar>, PolarError> {
        let dir = self.dir(shelf);
        let mut entries: Vec<_> = fs::read_dir(dir)
            .map_err(|e| PolarError::io(dir, e))?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    None
                }
            })
            .collect();
        entries.sort();

        let mut polars = Vec::with_capacity(entries.len());
        for path in entries {
            if !path.is_file() {
                continue;
            }
            let Some(id) = file_id(&path) else {
                continue;
            };
            match Self::read_polar(&path) {
                Ok(Some(mut polar)) => {
                    polar.id = Some(id);
                    polar.archived = shelf.is_archived();
                    polars.push(polar);
                }
                Ok(None) => debug!(path = %path.display(), "Skipping empty polar file"),
                Err(e) => warn!(error = %e, "Skipping unreadable polar file"),
            }
        }

        Ok(polars)
    }

    fn load(&self, shelf: Shelf, id: &str) -> Result<Option<Polar>, PolarError> {
        let path = self.path(shelf, id);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Self::read_polar(&path)?.map(|mut polar| {
            polar.id = Some(id.to_string());
            polar.archived = shelf.is_archived();
            polar
        }))
    }

    fn exists(&self, shelf: Shelf, id: &str) -> Result<bool, PolarError> {
        Ok(self.path(shelf, id).is_file())
    }

    fn save(&self, shelf: Shelf, id: &str, polar: &Polar) -> Result<(), PolarError> {
        let path = self.path(shelf, id);
        Self::write_polar(&path, polar)?;
        debug!(id, %shelf, path = %path.display(), "Saved polar");
        Ok(())
    }

    fn remove(&self, shelf: Shelf, id: &str) -> Result<(), PolarError> {
        let path = self.path(shelf, id);
        fs::remove_file(&path).map_err(|e| Self::not_found_or_io(id, &path, e))?;
        debug!(id, %shelf, "Removed polar");
        Ok(())
    }

    fn relocate(&self, id: &str, from: Shelf, to: Shelf) -> Result<(), PolarError> {
        let source = self.path(from, id);
        let target = self.path(to, id);
        fs::rename(&source, &target).map_err(|e| Self::not_found_or_io(id, &source, e))?;
        debug!(id, %from, %to, "Moved polar");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_polar;
    use tempfile::TempDir;

    fn repo() -> (TempDir, YamlDirectoryRepository) {
        let tmp = TempDir::new().unwrap();
        let repo =
            YamlDirectoryRepository::new(tmp.path().join("polars"), tmp.path().join("archived"))
                .unwrap();
        (tmp, repo)
    }

    #[test]
    fn test_creates_directories() {
        let (_tmp, repo) = repo();
        assert!(repo.polars_dir().is_dir());
        assert!(repo.archived_dir().is_dir());
    }

    #[test]
    fn test_rejects_file_in_place_of_directory() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("polars");
        fs::write(&blocker, "not a dir").unwrap();
        let result = YamlDirectoryRepository::new(&blocker, tmp.path().join("archived"));
        assert!(matches!(result, Err(PolarError::Io { .. })));
    }

    #[test]
    fn test_save_then_load_sets_id_and_shelf() {
        let (_tmp, repo) = repo();
        let mut polar = sample_polar("imoca", 3);
        polar.id = None;
        repo.save(Shelf::Archived, "imoca", &polar).unwrap();

        let loaded = repo.load(Shelf::Archived, "imoca").unwrap().unwrap();
        assert_eq!(loaded.id.as_deref(), Some("imoca"));
        assert!(loaded.archived);
        assert_eq!(loaded.sail, polar.sail);
        assert!(repo.load(Shelf::Active, "imoca").unwrap().is_none());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (_tmp, repo) = repo();
        repo.save(Shelf::Active, "imoca", &sample_polar("imoca", 3))
            .unwrap();
        let names: Vec<_> = fs::read_dir(repo.polars_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["imoca.yaml".to_string()]);
    }

    #[test]
    fn test_list_skips_foreign_and_broken_files() {
        let (_tmp, repo) = repo();
        repo.save(Shelf::Active, "imoca", &sample_polar("imoca", 3))
            .unwrap();
        fs::write(repo.polars_dir().join("notes.txt"), "hello").unwrap();
        fs::write(repo.polars_dir().join("broken.yaml"), "label: [unclosed").unwrap();
        fs::write(repo.polars_dir().join("empty.yaml"), "").unwrap();
        fs::create_dir(repo.polars_dir().join("nested.yaml")).unwrap();

        let polars = repo.list(Shelf::Active).unwrap();
        assert_eq!(polars.len(), 1);
        assert_eq!(polars[0].id.as_deref(), Some("imoca"));
    }

    #[test]
    fn test_list_takes_id_from_first_dot() {
        let (_tmp, repo) = repo();
        let text = serde_yaml::to_string(&sample_polar("whatever", 4)).unwrap();
        fs::write(repo.polars_dir().join("class40.v2.yaml"), text).unwrap();

        let polars = repo.list(Shelf::Active).unwrap();
        assert_eq!(polars[0].id.as_deref(), Some("class40"));
    }

    #[test]
    fn test_remove_and_relocate_missing() {
        let (_tmp, repo) = repo();
        assert!(matches!(
            repo.remove(Shelf::Active, "ghost"),
            Err(PolarError::NotFound(id)) if id == "ghost"
        ));
        assert!(matches!(
            repo.relocate("ghost", Shelf::Active, Shelf::Archived),
            Err(PolarError::NotFound(_))
        ));
    }

    #[test]
    fn test_relocate_moves_file() {
        let (_tmp, repo) = repo();
        repo.save(Shelf::Active, "imoca", &sample_polar("imoca", 3))
            .unwrap();
        repo.relocate("imoca", Shelf::Active, Shelf::Archived)
            .unwrap();
        assert!(!repo.exists(Shelf::Active, "imoca").unwrap());
        assert!(repo.exists(Shelf::Archived, "imoca").unwrap());
    }
}
