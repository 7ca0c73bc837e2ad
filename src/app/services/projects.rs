use uuid::Uuid;

use crate::app::domain::layout::PageSettings;
use crate::app::domain::project::SavedProject;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::storage::StorageBackend;

/// Ordered collection of saved projects, newest first, persisted as one
/// JSON record on every mutation.
///
/// Generic over the storage backend so tests run against
/// [`MemoryBackend`](crate::app::infrastructure::storage::MemoryBackend)
/// without touching the filesystem.
pub struct ProjectStore<S: StorageBackend> {
    backend: S,
    projects: Vec<SavedProject>,
}

impl<S: StorageBackend> ProjectStore<S> {
    /// Load the store from its backend. A missing record starts empty;
    /// a corrupt one is discarded with a warning rather than failing
    /// initialization.
    pub fn open(backend: S) -> Self {
        let projects = match backend.read() {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(projects) => projects,
                Err(e) => {
                    eprintln!("Failed to parse saved projects: {}. Starting with an empty list.", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("Failed to read saved projects: {}. Starting with an empty list.", e);
                Vec::new()
            }
        };
        Self { backend, projects }
    }

    /// Snapshot the given settings and content under `name`.
    /// Always creates a new record at the head of the list.
    pub fn save(
        &mut self,
        name: &str,
        settings: &PageSettings,
        content: &str,
    ) -> Result<SavedProject> {
        if name.trim().is_empty() {
            return Err(AppError::InvalidName);
        }
        let project = SavedProject::new(
            name.to_string(),
            settings.clone(),
            content.to_string(),
        );
        self.projects.insert(0, project.clone());
        self.persist()?;
        Ok(project)
    }

    /// Return the stored pair unchanged.
    pub fn load(&self, id: Uuid) -> Result<(PageSettings, String)> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| (p.settings.clone(), p.content.clone()))
            .ok_or(AppError::NotFound(id))
    }

    /// Delete by id. Deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() != before {
            self.persist()?;
        }
        Ok(())
    }

    /// All saved projects, newest first.
    pub fn list(&self) -> &[SavedProject] {
        &self.projects
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string_pretty(&self.projects)?;
        self.backend.write(&payload)?;
        Ok(())
    }
}
