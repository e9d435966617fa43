//! Template persistence
//!
//! The template collection is read once at startup and written back after
//! every add or delete. Backends implement [`TemplateRepository`]:
//!
//! - `InMemoryRepository`: process memory only
//! - `FileRepository`: one JSON document on disk
//!
//! [`TemplateStore`] sits on top and keeps storage failures from reaching
//! the form engine.

pub mod error;
mod file;
mod memory;
mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use file::FileRepository;
pub use memory::InMemoryRepository;
pub use store::TemplateStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::FormTemplate;

/// Load/save contract for the template collection
pub trait TemplateRepository: Send + Sync {
    /// Read every stored template
    fn load(&self) -> PersistenceResult<Vec<FormTemplate>>;

    /// Replace the stored collection with `templates`
    fn save(&self, templates: &[FormTemplate]) -> PersistenceResult<()>;
}

/// Create a repository from configuration
pub fn create_repository(config: &StorageConfig) -> Arc<dyn TemplateRepository> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryRepository::new()),
        StorageBackend::File => Arc::new(FileRepository::new(&config.path)),
    }
}
