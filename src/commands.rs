//! Command handlers behind the CLI
//!
//! Each handler takes the open [`TemplateStore`] and writes human-readable
//! output to `out`, so the binary and tests share one code path.

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::builder::FormBuilder;
use crate::cli::Command;
use crate::domain::{FieldType, FieldUpdate, FieldValue, FormTemplate, ValidationRule};
use crate::persistence::TemplateStore;
use crate::render::{Control, FormError, SessionOptions, Viewer};

/// One field as written in a `create` input file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDraft {
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub placeholder: Option<String>,
    pub options: Option<OptionsDraft>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub validation: Option<ValidationRule>,
    pub min_length: Option<f64>,
    pub max_length: Option<f64>,
}

/// Options as a list or as the builder's comma separated text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OptionsDraft {
    List(Vec<String>),
    Text(String),
}

impl FieldDraft {
    /// The edits that turn a fresh builder field into this draft
    pub fn updates(&self) -> Vec<FieldUpdate> {
        let mut updates = Vec::new();
        if let Some(name) = &self.name {
            updates.push(FieldUpdate::Name(name.clone()));
        }
        if let Some(label) = &self.label {
            updates.push(FieldUpdate::Label(label.clone()));
        }
        if let Some(field_type) = self.field_type {
            updates.push(FieldUpdate::Type(field_type));
        }
        if let Some(placeholder) = &self.placeholder {
            updates.push(FieldUpdate::Placeholder(placeholder.clone()));
        }
        match &self.options {
            Some(OptionsDraft::List(list)) => updates.push(FieldUpdate::Options(list.clone())),
            Some(OptionsDraft::Text(text)) => {
                updates.push(FieldUpdate::Options(crate::domain::parse_options(text)))
            }
            None => {}
        }
        if let Some(required) = self.required {
            updates.push(FieldUpdate::Required(required));
        }
        if let Some(value) = &self.default_value {
            updates.push(FieldUpdate::DefaultValue(value.clone()));
        }
        if let Some(rule) = self.validation {
            updates.push(FieldUpdate::Validation(rule));
        }
        if self.min_length.is_some() {
            updates.push(FieldUpdate::MinLength(self.min_length));
        }
        if self.max_length.is_some() {
            updates.push(FieldUpdate::MaxLength(self.max_length));
        }
        updates
    }
}

/// Read a draft list from YAML or JSON, by extension
pub fn load_drafts(path: &Path) -> anyhow::Result<Vec<FieldDraft>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read field list {}", path.display()))?;
    let drafts = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        other => bail!("Unsupported field list format: {:?}", other),
    };
    Ok(drafts)
}

pub fn execute(
    command: &Command,
    store: &mut TemplateStore,
    options: SessionOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::List => list(store, out),
        Command::Show { id } => show(store, *id, out),
        Command::Create { title, fields } => {
            let drafts = load_drafts(fields)?;
            create(store, title, &drafts, out).map(|_| ())
        }
        Command::Delete { id } => delete(store, *id, out),
        Command::Fill { id, set, toggle } => fill(store, *id, set, toggle, options, out),
    }
}

pub fn list(store: &TemplateStore, out: &mut impl Write) -> anyhow::Result<()> {
    if store.is_empty() {
        writeln!(out, "No saved forms found. Please create some forms first.")?;
        return Ok(());
    }
    for template in store.templates() {
        writeln!(
            out,
            "{}  {}  ({} field(s), created {})",
            template.id,
            template.title,
            template.fields.len(),
            template.created_at.format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

fn find(store: &TemplateStore, id: Uuid) -> anyhow::Result<FormTemplate> {
    store
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("Form not found: {}", id))
}

pub fn show(store: &TemplateStore, id: Uuid, out: &mut impl Write) -> anyhow::Result<()> {
    let template = find(store, id)?;
    writeln!(out, "{}", template.title)?;

    let viewer = Viewer::open(Some(template));
    if let Some(session) = viewer.session() {
        for field in session.controls() {
            let marker = if field.required { " *" } else { "" };
            writeln!(
                out,
                "  {}{} [{}] -> {}",
                field.label,
                marker,
                field.name,
                describe(&field.control)
            )?;
        }
    }
    Ok(())
}

fn describe(control: &Control) -> String {
    match control {
        Control::TextInput { input } => format!("input {:?}", input).to_lowercase(),
        Control::Dropdown { options } => format!("dropdown [{}]", options.join(", ")),
        Control::RadioGroup { options } => format!("radio [{}]", options.join(", ")),
        Control::CheckboxGroup { options } => format!("checkboxes [{}]", options.join(", ")),
        Control::Toggle => "toggle".to_string(),
    }
}

pub fn create(
    store: &mut TemplateStore,
    title: &str,
    drafts: &[FieldDraft],
    out: &mut impl Write,
) -> anyhow::Result<Uuid> {
    let mut builder = FormBuilder::new();
    for draft in drafts {
        let index = builder.add_field();
        for update in draft.updates() {
            builder.update_field(index, update)?;
        }
    }

    let id = builder.save(store, title)?;
    writeln!(out, "Saved form '{}' as {}", title.trim(), id)?;
    Ok(id)
}

pub fn delete(store: &mut TemplateStore, id: Uuid, out: &mut impl Write) -> anyhow::Result<()> {
    if !store.delete(id) {
        bail!("Form not found: {}", id);
    }
    writeln!(out, "Deleted form {}", id)?;
    Ok(())
}

pub fn fill(
    store: &TemplateStore,
    id: Uuid,
    set: &[(String, String)],
    toggle: &[(String, String)],
    options: SessionOptions,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut session = match Viewer::open_with(store.get(id).cloned(), options) {
        Viewer::Ready(session) => session,
        Viewer::Missing(state) => bail!("{}", state.message),
    };

    for (name, raw) in set {
        let is_toggle = session
            .controls()
            .iter()
            .any(|f| f.name == name.as_str() && f.control == Control::Toggle);
        let value = if is_toggle {
            FieldValue::Bool(parse_bool(raw))
        } else {
            FieldValue::text(raw.as_str())
        };
        session.set_value(name, value)?;
    }
    for (name, option) in toggle {
        session.toggle_option(name, option)?;
    }

    match session.submit() {
        Ok(submission) => {
            writeln!(out, "Submitted Data for \"{}\":", submission.title)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&submission.values)?)?;
            Ok(())
        }
        Err(FormError::Invalid(errors)) => {
            for (name, message) in &errors {
                writeln!(out, "  {}: {}", name, message)?;
            }
            bail!("Please fix errors before submitting.")
        }
        Err(e) => Err(e.into()),
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}
