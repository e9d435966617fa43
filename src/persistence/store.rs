//! The durable template collection

use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::TemplateRepository;
use crate::domain::{FieldDefinition, FormTemplate, TemplateError};

/// Owns the saved templates and writes them through a repository.
///
/// Storage failures are logged and never undo the in-memory change.
pub struct TemplateStore {
    repository: Arc<dyn TemplateRepository>,
    templates: Vec<FormTemplate>,
}

impl TemplateStore {
    /// Load the collection once. A load failure starts from an empty list.
    pub fn open(repository: Arc<dyn TemplateRepository>) -> Self {
        let templates = match repository.load() {
            Ok(templates) => {
                info!("Loaded {} form template(s)", templates.len());
                templates
            }
            Err(e) => {
                error!("Failed to load templates: {}", e);
                Vec::new()
            }
        };

        Self {
            repository,
            templates,
        }
    }

    pub fn templates(&self) -> &[FormTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&FormTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Save a copy of `fields` as a new template
    pub fn add(
        &mut self,
        title: &str,
        fields: &[FieldDefinition],
    ) -> Result<&FormTemplate, TemplateError> {
        let template = FormTemplate::new(title, fields)?;
        info!(id = %template.id, title = %template.title, fields = fields.len(), "Saved form template");

        self.templates.push(template);
        self.persist();
        Ok(&self.templates[self.templates.len() - 1])
    }

    /// Remove a template by id. Returns whether one was removed.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        let removed = self.templates.len() != before;

        if removed {
            info!(%id, "Deleted form template");
            self.persist();
        } else {
            debug!(%id, "Delete requested for unknown template");
        }
        removed
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.templates) {
            error!("Failed to persist templates: {}", e);
        }
    }
}
