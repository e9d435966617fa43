//! Form render and interaction engine
//!
//! Turns a [`FormTemplate`](crate::domain::FormTemplate) into typed controls,
//! tracks per-field values and errors, and produces a submission.

pub mod control;
pub mod session;
pub mod viewer;

pub use control::{control_for, Control, InputKind};
pub use session::{FormError, FormSession, RenderedField, SessionOptions, Submission};
pub use viewer::{EmptyState, Navigation, Viewer};
