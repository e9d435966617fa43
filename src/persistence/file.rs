//! JSON file template repository

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{PersistenceError, PersistenceResult};
use super::TemplateRepository;
use crate::domain::FormTemplate;

/// Stores the whole collection as one pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl TemplateRepository for FileRepository {
    fn load(&self) -> PersistenceResult<Vec<FormTemplate>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::io(self.display_path(), e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, templates: &[FormTemplate]) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::io(parent.display().to_string(), e))?;
        }

        let content = serde_json::to_string_pretty(templates)?;
        std::fs::write(&self.path, content)
            .map_err(|e| PersistenceError::io(self.display_path(), e))?;
        debug!(path = %self.path.display(), count = templates.len(), "Wrote templates");
        Ok(())
    }
}
