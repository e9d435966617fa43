//! Field definitions
//!
//! `FieldDefinition` is the flat shape a builder edits and the store
//! persists. `FieldSpec` is the typed view the validation and render
//! engines consume: each `FieldKind` variant carries only the attributes
//! that mean something for its type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::value::FieldValue;

// ============================================================================
// Enumerations
// ============================================================================

/// Input type of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    /// All types in builder order
    pub fn all() -> &'static [FieldType] {
        &[
            Self::Text,
            Self::Number,
            Self::Textarea,
            Self::Select,
            Self::Radio,
            Self::Checkbox,
            Self::Date,
        ]
    }

    /// Label shown in the builder's type picker
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Textarea => "Textarea",
            Self::Select => "Select",
            Self::Radio => "Radio",
            Self::Checkbox => "Checkbox",
            Self::Date => "Date",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
        }
    }

    /// Whether the type draws its choices from `options`
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown field type: {}", s))
    }
}

/// Format rule applied to text-like values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationRule {
    #[default]
    None,
    Email,
    Password,
}

impl ValidationRule {
    pub fn all() -> &'static [ValidationRule] {
        &[Self::None, Self::Email, Self::Password]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

// ============================================================================
// Flat authoring form
// ============================================================================

/// One form field as authored in the builder.
///
/// `min_length`/`max_length` are numeric bounds for `number` fields and
/// length bounds for every other type. Use [`FieldSpec::from`] to get the
/// unambiguous typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "deserialize_default_value")]
    pub default_value: String,
    #[serde(default)]
    pub validation: ValidationRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<f64>,
}

impl FieldDefinition {
    /// A fresh `text` field with safe defaults everywhere
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            label: "Untitled".to_string(),
            field_type: FieldType::Text,
            placeholder: String::new(),
            options: Vec::new(),
            required: false,
            default_value: String::new(),
            validation: ValidationRule::None,
            min_length: None,
            max_length: None,
        }
    }

    /// Return a copy with one attribute replaced
    pub fn with(&self, update: FieldUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FieldUpdate::Label(label) => next.label = label,
            FieldUpdate::Name(name) => next.name = name,
            FieldUpdate::Type(field_type) => next.field_type = field_type,
            FieldUpdate::Placeholder(placeholder) => next.placeholder = placeholder,
            FieldUpdate::DefaultValue(value) => next.default_value = value,
            FieldUpdate::Options(options) => next.options = options,
            FieldUpdate::Required(required) => next.required = required,
            FieldUpdate::Validation(rule) => next.validation = rule,
            FieldUpdate::MinLength(min) => next.min_length = min,
            FieldUpdate::MaxLength(max) => next.max_length = max,
        }
        next
    }

    pub fn spec(&self) -> FieldSpec {
        FieldSpec::from(self)
    }
}

/// Stored documents may carry a non-string default; keep its text form.
fn deserialize_default_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// A single-attribute edit applied by [`FieldDefinition::with`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Label(String),
    Name(String),
    Type(FieldType),
    Placeholder(String),
    DefaultValue(String),
    Options(Vec<String>),
    Required(bool),
    Validation(ValidationRule),
    MinLength(Option<f64>),
    MaxLength(Option<f64>),
}

/// Parse the builder's comma separated options text
pub fn parse_options(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Typed view
// ============================================================================

/// Inclusive character (or item) count bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LengthBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Type-specific attributes of a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text {
        length: LengthBounds,
        format: ValidationRule,
    },
    Textarea {
        length: LengthBounds,
        format: ValidationRule,
    },
    Date {
        length: LengthBounds,
        format: ValidationRule,
    },
    Number {
        bounds: NumberBounds,
    },
    Select {
        options: Vec<String>,
        length: LengthBounds,
        format: ValidationRule,
    },
    Radio {
        options: Vec<String>,
        length: LengthBounds,
        format: ValidationRule,
    },
    /// A group when `options` is non-empty, otherwise a single toggle
    Checkbox {
        options: Vec<String>,
        length: LengthBounds,
        format: ValidationRule,
    },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text { .. } => FieldType::Text,
            Self::Textarea { .. } => FieldType::Textarea,
            Self::Date { .. } => FieldType::Date,
            Self::Number { .. } => FieldType::Number,
            Self::Select { .. } => FieldType::Select,
            Self::Radio { .. } => FieldType::Radio,
            Self::Checkbox { .. } => FieldType::Checkbox,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::Select { options, .. }
            | Self::Radio { options, .. }
            | Self::Checkbox { options, .. } => options,
            _ => &[],
        }
    }

    /// True for a checkbox with at least one option
    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::Checkbox { options, .. } if !options.is_empty())
    }

    pub fn length_bounds(&self) -> Option<LengthBounds> {
        match self {
            Self::Number { .. } => None,
            Self::Text { length, .. }
            | Self::Textarea { length, .. }
            | Self::Date { length, .. }
            | Self::Select { length, .. }
            | Self::Radio { length, .. }
            | Self::Checkbox { length, .. } => Some(*length),
        }
    }

    pub fn format(&self) -> ValidationRule {
        match self {
            Self::Number { .. } => ValidationRule::None,
            Self::Text { format, .. }
            | Self::Textarea { format, .. }
            | Self::Date { format, .. }
            | Self::Select { format, .. }
            | Self::Radio { format, .. }
            | Self::Checkbox { format, .. } => *format,
        }
    }
}

/// A field as seen by the validation and render engines
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub id: Uuid,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub default_value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// The value a form starts with when defaults are pre-filled
    pub fn seed_value(&self) -> Option<FieldValue> {
        if self.default_value.is_empty() {
            return None;
        }
        Some(match &self.kind {
            FieldKind::Checkbox { options, .. } if !options.is_empty() => {
                FieldValue::Multi(parse_options(&self.default_value))
            }
            FieldKind::Checkbox { .. } => {
                FieldValue::Bool(self.default_value.trim().eq_ignore_ascii_case("true"))
            }
            _ => FieldValue::Text(self.default_value.clone()),
        })
    }
}

impl From<&FieldDefinition> for FieldSpec {
    fn from(def: &FieldDefinition) -> Self {
        let length = LengthBounds {
            min: def.min_length,
            max: def.max_length,
        };
        let format = def.validation;
        let options = def.options.clone();

        let kind = match def.field_type {
            FieldType::Text => FieldKind::Text { length, format },
            FieldType::Textarea => FieldKind::Textarea { length, format },
            FieldType::Date => FieldKind::Date { length, format },
            FieldType::Number => FieldKind::Number {
                bounds: NumberBounds {
                    min: def.min_length,
                    max: def.max_length,
                },
            },
            FieldType::Select => FieldKind::Select {
                options,
                length,
                format,
            },
            FieldType::Radio => FieldKind::Radio {
                options,
                length,
                format,
            },
            FieldType::Checkbox => FieldKind::Checkbox {
                options,
                length,
                format,
            },
        };

        Self {
            id: def.id,
            name: def.name.clone(),
            label: def.label.clone(),
            placeholder: def.placeholder.clone(),
            default_value: def.default_value.clone(),
            required: def.required,
            kind,
        }
    }
}
