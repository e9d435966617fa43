//! # Formwright - Form Builder and Renderer
//!
//! Formwright lets you design form templates field by field, save them, and
//! fill them in with per-field validation.
//!
//! ## Features
//!
//! - **7 Field Types**: text, textarea, number, date, select, radio, checkbox
//! - **Validation**: required, numeric range, length range, email and password rules
//! - **Persistence**: in-memory or JSON file storage behind one repository trait
//! - **Configuration**: TOML/YAML/JSON file, `FORMWRIGHT_*` env vars and CLI overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use formwright::builder::FormBuilder;
//! use formwright::domain::FieldUpdate;
//! use formwright::persistence::{InMemoryRepository, TemplateStore};
//! use formwright::render::Viewer;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut store = TemplateStore::open(Arc::new(InMemoryRepository::new()));
//!
//!     let mut builder = FormBuilder::new();
//!     let index = builder.add_field();
//!     builder.update_field(index, FieldUpdate::Name("email".into()))?;
//!     builder.update_field(index, FieldUpdate::Required(true))?;
//!     let id = builder.save(&mut store, "Contact")?;
//!
//!     if let Viewer::Ready(mut session) = Viewer::open(store.get(id).cloned()) {
//!         session.set_value("email", "someone@example.com")?;
//!         let submission = session.submit()?;
//!         println!("{}", serde_json::to_string_pretty(&submission.values)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: field definitions, values and templates
//! - **Validation**: pure per-field predicates
//! - **Render**: control selection and the filling session
//! - **Persistence**: template repositories and the store
//! - **Config / CLI**: settings and the command line surface

pub mod builder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod persistence;
pub mod render;
pub mod validation;

pub use builder::{BuilderError, FormBuilder};
pub use domain::{FieldDefinition, FieldType, FieldValue, FormTemplate, ValidationRule};
pub use persistence::{TemplateRepository, TemplateStore};
pub use render::{FormError, FormSession, Submission, Viewer};
