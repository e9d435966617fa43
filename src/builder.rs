//! The builder's working field list
//!
//! A `FormBuilder` holds the fields being designed. Edits replace whole
//! fields so every change yields a new value; saving copies the list into
//! a template and resets the builder.

use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{parse_options, FieldDefinition, FieldUpdate, TemplateError};
use crate::persistence::TemplateStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Field index {index} out of range (list has {len} field(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

pub type BuilderResult<T> = Result<T, BuilderError>;

/// Transient list of fields being designed
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    fields: Vec<FieldDefinition>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn check_index(&self, index: usize) -> BuilderResult<()> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(BuilderError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            })
        }
    }

    /// Append a default text field and return its index
    pub fn add_field(&mut self) -> usize {
        let field = FieldDefinition::new(self.next_name());
        debug!(id = %field.id, name = %field.name, "Added field");
        self.fields.push(field);
        self.fields.len() - 1
    }

    /// `field_<millis>`, suffixed when two fields land on the same tick
    fn next_name(&self) -> String {
        let base = format!("field_{}", Utc::now().timestamp_millis());
        let taken = |name: &str| self.fields.iter().any(|f| f.name == name);
        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    /// Replace the field at `index` with an updated copy
    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> BuilderResult<&FieldDefinition> {
        self.check_index(index)?;
        self.fields[index] = self.fields[index].with(update);
        Ok(&self.fields[index])
    }

    /// Set options from the builder's comma separated text box
    pub fn set_options_text(&mut self, index: usize, text: &str) -> BuilderResult<&FieldDefinition> {
        self.update_field(index, FieldUpdate::Options(parse_options(text)))
    }

    pub fn remove_field(&mut self, index: usize) -> BuilderResult<FieldDefinition> {
        self.check_index(index)?;
        let removed = self.fields.remove(index);
        debug!(id = %removed.id, "Removed field");
        Ok(removed)
    }

    /// Move the field at `from` so it ends up at `to`
    pub fn move_field(&mut self, from: usize, to: usize) -> BuilderResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Save the list as a template and reset the builder.
    ///
    /// On error nothing is stored and the list is kept for correction.
    pub fn save(&mut self, store: &mut TemplateStore, title: &str) -> BuilderResult<Uuid> {
        let id = store.add(title, &self.fields)?.id;
        self.clear();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldType, ValidationRule};
    use crate::persistence::{FileRepository, InMemoryRepository};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn builder_with(n: usize) -> FormBuilder {
        let mut builder = FormBuilder::new();
        for _ in 0..n {
            builder.add_field();
        }
        builder
    }

    #[test]
    fn test_add_field_defaults_and_unique_names() {
        let builder = builder_with(3);
        assert_eq!(builder.len(), 3);
        let field = &builder.fields()[0];
        assert!(field.name.starts_with("field_"));
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.validation, ValidationRule::None);

        let mut names: Vec<&str> = builder.fields().iter().map(|f| f.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_update_replaces_field() {
        let mut builder = builder_with(1);
        let before = builder.fields()[0].clone();
        builder
            .update_field(0, FieldUpdate::Label("Email".into()))
            .unwrap();
        assert_eq!(builder.fields()[0].label, "Email");
        assert_eq!(builder.fields()[0].id, before.id);
        assert_ne!(builder.fields()[0], before);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut builder = builder_with(1);
        assert_eq!(
            builder.update_field(3, FieldUpdate::Required(true)).unwrap_err(),
            BuilderError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_set_options_text() {
        let mut builder = builder_with(1);
        let field = builder.set_options_text(0, "a, b ,, c").unwrap();
        assert_eq!(field.options, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_field() {
        let mut builder = builder_with(2);
        let second = builder.fields()[1].id;
        builder.remove_field(0).unwrap();
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.position(second), Some(0));
    }

    #[test]
    fn test_move_field() {
        let mut builder = builder_with(3);
        let ids: Vec<Uuid> = builder.fields().iter().map(|f| f.id).collect();
        builder.move_field(0, 2).unwrap();
        let moved: Vec<Uuid> = builder.fields().iter().map(|f| f.id).collect();
        assert_eq!(moved, vec![ids[1], ids[2], ids[0]]);
        assert!(builder.move_field(0, 3).is_err());
    }

    #[test]
    fn test_save_resets_list() {
        let mut store = TemplateStore::open(Arc::new(InMemoryRepository::new()));
        let mut builder = builder_with(2);
        let id = builder.save(&mut store, "Contact").unwrap();
        assert!(builder.is_empty());
        assert_eq!(store.get(id).unwrap().fields.len(), 2);
    }

    #[test]
    fn test_save_empty_list_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("forms.json");
        let mut store = TemplateStore::open(Arc::new(FileRepository::new(&path)));

        let id = FormBuilder::new().save(&mut store, "Empty").unwrap();
        assert!(store.get(id).unwrap().fields.is_empty());

        let reopened = TemplateStore::open(Arc::new(FileRepository::new(&path)));
        assert_eq!(reopened.get(id), store.get(id));
    }

    #[test]
    fn test_failed_save_keeps_list() {
        let mut store = TemplateStore::open(Arc::new(InMemoryRepository::new()));
        let mut builder = builder_with(1);
        builder.update_field(0, FieldUpdate::Name(String::new())).unwrap();
        assert_eq!(
            builder.save(&mut store, "Broken").unwrap_err(),
            BuilderError::Template(TemplateError::EmptyFieldName(0))
        );
        assert_eq!(builder.len(), 1);
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn prop_move_preserves_fields(len in 1usize..12, from_seed in 0usize..64, to_seed in 0usize..64) {
            let mut builder = builder_with(len);
            for i in 0..len {
                builder.update_field(i, FieldUpdate::Label(format!("label {}", i))).unwrap();
            }
            let before = builder.fields().to_vec();
            let (from, to) = (from_seed % len, to_seed % len);

            builder.move_field(from, to).unwrap();
            let after = builder.fields();

            prop_assert_eq!(after.len(), before.len());
            prop_assert_eq!(&after[to], &before[from]);
            for field in &before {
                prop_assert!(after.contains(field));
            }
        }
    }
}
