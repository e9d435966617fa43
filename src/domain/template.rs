//! Saved form templates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use super::field::{FieldDefinition, FieldSpec};

/// Reasons a working field list cannot become a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Please enter a form name")]
    EmptyTitle,

    #[error("Field at position {0} has an empty name")]
    EmptyFieldName(usize),

    #[error("Duplicate field name: '{0}'")]
    DuplicateFieldName(String),
}

/// A named, ordered set of field definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub id: Uuid,
    pub title: String,
    pub fields: Vec<FieldDefinition>,
    pub created_at: DateTime<Utc>,
}

impl FormTemplate {
    /// Build a template from a copy of `fields`.
    ///
    /// The title is trimmed. Field names must be non-empty and unique, since
    /// they become the submission payload keys.
    pub fn new(title: &str, fields: &[FieldDefinition]) -> Result<Self, TemplateError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TemplateError::EmptyTitle);
        }
        check_field_names(fields)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            fields: fields.to_vec(),
            created_at: Utc::now(),
        })
    }

    /// Typed views of the fields, in display order
    pub fn specs(&self) -> Vec<FieldSpec> {
        self.fields.iter().map(FieldSpec::from).collect()
    }
}

fn check_field_names(fields: &[FieldDefinition]) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    for (idx, field) in fields.iter().enumerate() {
        let name = field.name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyFieldName(idx));
        }
        if !seen.insert(name) {
            return Err(TemplateError::DuplicateFieldName(name.to_string()));
        }
    }
    Ok(())
}
