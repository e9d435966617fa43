//! In-memory template repository

use std::sync::RwLock;

use super::error::{PersistenceError, PersistenceResult};
use super::TemplateRepository;
use crate::domain::FormTemplate;

/// Keeps the collection in process memory (lost on exit)
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    templates: RwLock<Vec<FormTemplate>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing collection
    pub fn with_templates(templates: Vec<FormTemplate>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }
}

impl TemplateRepository for InMemoryRepository {
    fn load(&self) -> PersistenceResult<Vec<FormTemplate>> {
        let templates = self
            .templates
            .read()
            .map_err(|e| PersistenceError::Internal(format!("Lock poisoned: {}", e)))?;
        Ok(templates.clone())
    }

    fn save(&self, templates: &[FormTemplate]) -> PersistenceResult<()> {
        let mut stored = self
            .templates
            .write()
            .map_err(|e| PersistenceError::Internal(format!("Lock poisoned: {}", e)))?;
        *stored = templates.to_vec();
        Ok(())
    }
}
