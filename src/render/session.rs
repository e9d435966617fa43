//! Live form state for one loaded template

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::control::{control_for, Control};
use super::viewer::Navigation;
use crate::domain::{FieldSpec, FieldValue, FormTemplate};
use crate::persistence::TemplateStore;
use crate::validation;

/// Errors raised by [`FormSession`] operations
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    /// Submit found at least one invalid field. Carries the full error map.
    #[error("Please fix errors before submitting ({} invalid field(s))", .0.len())]
    Invalid(BTreeMap<String, String>),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' is not a checkbox group")]
    NotMultiSelect(String),
}

/// Behaviour switches for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Seed values from each field's `defaultValue` when the form opens
    pub prefill_defaults: bool,
}

/// Payload produced by a successful submit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub template_id: Uuid,
    pub title: String,
    pub submitted_at: DateTime<Utc>,
    /// One entry per field name; `None` for fields never touched
    pub values: BTreeMap<String, Option<FieldValue>>,
}

/// One field as the view should draw it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub value: Option<&'a FieldValue>,
    pub error: Option<&'a str>,
    #[serde(flatten)]
    pub control: Control,
}

/// Values and errors of a template being filled in.
///
/// Every change is validated immediately; [`FormSession::submit`]
/// re-validates everything.
#[derive(Debug, Clone)]
pub struct FormSession {
    template: FormTemplate,
    specs: Vec<FieldSpec>,
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
}

impl FormSession {
    pub fn new(template: FormTemplate) -> Self {
        Self::with_options(template, SessionOptions::default())
    }

    pub fn with_options(template: FormTemplate, options: SessionOptions) -> Self {
        let specs = template.specs();
        let mut values = BTreeMap::new();

        if options.prefill_defaults {
            for spec in &specs {
                if let Some(seed) = spec.seed_value() {
                    values.insert(spec.name.clone(), seed);
                }
            }
        }

        debug!(
            template = %template.id,
            fields = specs.len(),
            prefilled = values.len(),
            "Opened form session"
        );

        Self {
            template,
            specs,
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn template(&self) -> &FormTemplate {
        &self.template
    }

    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    // With duplicate names the first field wins, matching the shared value slot.
    fn spec(&self, name: &str) -> Result<&FieldSpec, FormError> {
        self.specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Store `value` for `name` and validate that field.
    ///
    /// Returns the field's new error, if any.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Option<String>, FormError> {
        let value = value.into();
        let error = validation::validate(self.spec(name)?, Some(&value));

        self.values.insert(name.to_string(), value);
        match &error {
            Some(message) => {
                self.errors.insert(name.to_string(), message.clone());
            }
            None => {
                self.errors.remove(name);
            }
        }
        Ok(error)
    }

    /// Add or remove `option` from a checkbox group's selection
    pub fn toggle_option(&mut self, name: &str, option: &str) -> Result<Option<String>, FormError> {
        if !self.spec(name)?.kind.is_multi_select() {
            return Err(FormError::NotMultiSelect(name.to_string()));
        }

        let mut selection: Vec<String> = self
            .values
            .get(name)
            .and_then(FieldValue::as_selection)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        if let Some(pos) = selection.iter().position(|o| o == option) {
            selection.remove(pos);
        } else {
            selection.push(option.to_string());
        }

        self.set_value(name, FieldValue::Multi(selection))
    }

    /// Validate every field and, if all pass, hand back the payload.
    ///
    /// On failure the value map is untouched and the error map is replaced.
    /// On success the value map is cleared.
    pub fn submit(&mut self) -> Result<Submission, FormError> {
        let errors: BTreeMap<String, String> = self
            .specs
            .iter()
            .filter_map(|spec| {
                validation::validate(spec, self.values.get(&spec.name))
                    .map(|message| (spec.name.clone(), message))
            })
            .collect();
        self.errors = errors;

        if !self.errors.is_empty() {
            debug!(
                template = %self.template.id,
                invalid = self.errors.len(),
                "Submission rejected"
            );
            return Err(FormError::Invalid(self.errors.clone()));
        }

        let values = self
            .specs
            .iter()
            .map(|spec| (spec.name.clone(), self.values.get(&spec.name).cloned()))
            .collect();
        self.values.clear();

        info!(template = %self.template.id, title = %self.template.title, "Form submitted");

        Ok(Submission {
            template_id: self.template.id,
            title: self.template.title.clone(),
            submitted_at: Utc::now(),
            values,
        })
    }

    /// Render view of every field in display order
    pub fn controls(&self) -> Vec<RenderedField<'_>> {
        self.specs
            .iter()
            .map(|spec| RenderedField {
                name: &spec.name,
                label: &spec.label,
                placeholder: &spec.placeholder,
                required: spec.required,
                value: self.values.get(&spec.name),
                error: self.error(&spec.name),
                control: control_for(&spec.kind),
            })
            .collect()
    }

    /// Delete the loaded template and send the user back to the list
    pub fn delete_template(self, store: &mut TemplateStore) -> Navigation {
        store.delete(self.template.id);
        Navigation::FormsList
    }
}
