//! Control dispatch: which input a field is drawn as

use serde::Serialize;

use crate::domain::FieldKind;

/// Flavour of a free-entry input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InputKind {
    Text,
    Multiline { rows: u16 },
    Number,
    Date,
}

/// Rows shown for a textarea
pub const TEXTAREA_ROWS: u16 = 4;

/// The control a field renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "control")]
pub enum Control {
    /// Single-line, multi-line, number or date entry
    TextInput { input: InputKind },
    /// Text entry with a fixed choice list
    Dropdown { options: Vec<String> },
    /// Mutually exclusive single choice
    RadioGroup { options: Vec<String> },
    /// Any number of choices
    CheckboxGroup { options: Vec<String> },
    /// Standalone boolean
    Toggle,
}

impl Control {
    /// Whether the control edits a selection set
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::CheckboxGroup { .. })
    }
}

/// Map a field kind to its control. Total over every kind.
pub fn control_for(kind: &FieldKind) -> Control {
    match kind {
        FieldKind::Text { .. } => Control::TextInput {
            input: InputKind::Text,
        },
        FieldKind::Textarea { .. } => Control::TextInput {
            input: InputKind::Multiline {
                rows: TEXTAREA_ROWS,
            },
        },
        FieldKind::Number { .. } => Control::TextInput {
            input: InputKind::Number,
        },
        FieldKind::Date { .. } => Control::TextInput {
            input: InputKind::Date,
        },
        FieldKind::Select { options, .. } => Control::Dropdown {
            options: options.clone(),
        },
        FieldKind::Radio { options, .. } => Control::RadioGroup {
            options: options.clone(),
        },
        FieldKind::Checkbox { options, .. } if options.is_empty() => Control::Toggle,
        FieldKind::Checkbox { options, .. } => Control::CheckboxGroup {
            options: options.clone(),
        },
    }
}
