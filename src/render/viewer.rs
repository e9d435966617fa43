//! Entry point for filling in a template

use super::session::{FormSession, SessionOptions};
use crate::domain::FormTemplate;

/// Where the surrounding shell should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    FormsList,
}

/// Shown when the viewer is opened without a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: &'static str,
    pub action_label: &'static str,
    pub recovery: Navigation,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: "Form not found/Select a Form to preview",
            action_label: "Go to Forms",
            recovery: Navigation::FormsList,
        }
    }
}

/// What the viewer shows for a (possibly missing) selection
#[derive(Debug, Clone)]
pub enum Viewer {
    Ready(FormSession),
    Missing(EmptyState),
}

impl Viewer {
    pub fn open(selected: Option<FormTemplate>) -> Self {
        Self::open_with(selected, SessionOptions::default())
    }

    pub fn open_with(selected: Option<FormTemplate>, options: SessionOptions) -> Self {
        match selected {
            Some(template) => Self::Ready(FormSession::with_options(template, options)),
            None => Self::Missing(EmptyState::default()),
        }
    }

    pub fn session(&self) -> Option<&FormSession> {
        match self {
            Self::Ready(session) => Some(session),
            Self::Missing(_) => None,
        }
    }

    pub fn into_session(self) -> Option<FormSession> {
        match self {
            Self::Ready(session) => Some(session),
            Self::Missing(_) => None,
        }
    }
}
