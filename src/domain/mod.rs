//! Core form types: field definitions, values and templates

pub mod field;
pub mod template;
pub mod value;

pub use field::{
    parse_options, FieldDefinition, FieldKind, FieldSpec, FieldType, FieldUpdate, LengthBounds,
    NumberBounds, ValidationRule,
};
pub use template::{FormTemplate, TemplateError};
pub use value::FieldValue;
