//! Field validation engine
//!
//! [`validate`] runs one linear chain of rules against a candidate value and
//! returns the first failure as a user-facing message:
//!
//! 1. required
//! 2. empty, non-required values pass
//! 3. bounds (numeric for `number`, length for everything else)
//! 4. format (email / password)
//!
//! Each rule is a standalone predicate so it can be tested on its own.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::value::format_number;
use crate::domain::{FieldDefinition, FieldKind, FieldSpec, FieldValue, LengthBounds, NumberBounds, ValidationRule};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const SELECT_ONE_MESSAGE: &str = "Please select at least one option";
pub const EMAIL_MESSAGE: &str = "Invalid email format";
pub const PASSWORD_MESSAGE: &str =
    "Password must be 8-20 chars, include uppercase, lowercase, number & special char";

/// Symbols a password may contain, and must contain at least one of
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Validate `value` against `field`. `None` means the value is acceptable.
pub fn validate(field: &FieldSpec, value: Option<&FieldValue>) -> Option<String> {
    if let Some(message) = check_required(field, value) {
        return Some(message);
    }

    let value = match value {
        Some(v) if !v.is_falsy() => v,
        _ => return None,
    };

    let bounds_error = match &field.kind {
        FieldKind::Number { bounds } => check_number_bounds(bounds, value),
        kind => kind
            .length_bounds()
            .and_then(|length| check_length_bounds(&length, value)),
    };
    if bounds_error.is_some() {
        return bounds_error;
    }

    check_format(field.kind.format(), value)
}

/// Convenience for callers holding the flat authoring form
pub fn validate_definition(field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
    validate(&FieldSpec::from(field), value)
}

/// Rule 1: required fields must hold something
pub fn check_required(field: &FieldSpec, value: Option<&FieldValue>) -> Option<String> {
    if !field.required {
        return None;
    }

    if field.kind.is_multi_select() {
        if let Some(FieldValue::Multi(items)) = value {
            if items.is_empty() {
                return Some(SELECT_ONE_MESSAGE.to_string());
            }
        }
    }

    match value {
        None => Some(REQUIRED_MESSAGE.to_string()),
        Some(v) if v.is_falsy() || v.is_blank() => Some(REQUIRED_MESSAGE.to_string()),
        Some(_) => None,
    }
}

/// Rule 3 for `number` fields
pub fn check_number_bounds(bounds: &NumberBounds, value: &FieldValue) -> Option<String> {
    // An unparseable value compares false against both bounds.
    let n = value.as_number()?;

    if let Some(min) = bounds.min {
        if n < min {
            return Some(format!("Minimum value is {}", format_number(min)));
        }
    }
    if let Some(max) = bounds.max {
        if n > max {
            return Some(format!("Maximum value is {}", format_number(max)));
        }
    }
    None
}

/// Rule 3 for every other type
pub fn check_length_bounds(bounds: &LengthBounds, value: &FieldValue) -> Option<String> {
    let len = value.length()? as f64;

    if let Some(min) = bounds.min {
        if len < min {
            return Some(format!("Minimum length is {}", format_number(min)));
        }
    }
    if let Some(max) = bounds.max {
        if len > max {
            return Some(format!("Maximum length is {}", format_number(max)));
        }
    }
    None
}

/// Rule 4
pub fn check_format(rule: ValidationRule, value: &FieldValue) -> Option<String> {
    let text = value.to_string();
    match rule {
        ValidationRule::None => None,
        ValidationRule::Email if !is_email(&text) => Some(EMAIL_MESSAGE.to_string()),
        ValidationRule::Password if !is_strong_password(&text) => {
            Some(PASSWORD_MESSAGE.to_string())
        }
        _ => None,
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"))
}

/// `local@domain.tld` shaped, no whitespace
pub fn is_email(text: &str) -> bool {
    email_regex().is_match(text)
}

/// At least 8 characters drawn from letters, digits and [`PASSWORD_SYMBOLS`],
/// with at least one of each class.
pub fn is_strong_password(text: &str) -> bool {
    let is_symbol = |c: char| PASSWORD_SYMBOLS.contains(c);

    text.chars().count() >= 8
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_symbol(c))
        && text.chars().any(|c| c.is_ascii_lowercase())
        && text.chars().any(|c| c.is_ascii_uppercase())
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().any(is_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldType, FieldUpdate};

    fn field(field_type: FieldType) -> FieldDefinition {
        FieldDefinition::new("f").with(FieldUpdate::Type(field_type))
    }

    fn check(field: &FieldDefinition, value: impl Into<FieldValue>) -> Option<String> {
        validate_definition(field, Some(&value.into()))
    }

    #[test]
    fn test_required_rejects_empty_and_absent() {
        for t in FieldType::all() {
            let f = field(*t).with(FieldUpdate::Required(true));
            assert!(check(&f, "").is_some(), "{} accepted empty", t);
            assert!(validate_definition(&f, None).is_some(), "{} accepted absent", t);
            assert!(check(&f, "   ").is_some(), "{} accepted blank", t);
        }
    }

    #[test]
    fn test_required_message() {
        let f = field(FieldType::Text).with(FieldUpdate::Required(true));
        assert_eq!(check(&f, "").as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_optional_empty_passes() {
        let f = field(FieldType::Text).with(FieldUpdate::MinLength(Some(3.0)));
        assert_eq!(check(&f, ""), None);
        assert_eq!(validate_definition(&f, None), None);
    }

    #[test]
    fn test_number_bounds() {
        let f = field(FieldType::Number)
            .with(FieldUpdate::MinLength(Some(5.0)))
            .with(FieldUpdate::MaxLength(Some(10.0)));
        assert_eq!(check(&f, 4i64).as_deref(), Some("Minimum value is 5"));
        assert_eq!(check(&f, 11i64).as_deref(), Some("Maximum value is 10"));
        assert_eq!(check(&f, 7i64), None);
        assert_eq!(check(&f, "4").as_deref(), Some("Minimum value is 5"));
        assert_eq!(check(&f, "10"), None);
    }

    #[test]
    fn test_number_text_spellings_against_bounds() {
        let f = field(FieldType::Number)
            .with(FieldUpdate::MinLength(Some(5.0)))
            .with(FieldUpdate::MaxLength(Some(10.0)));
        assert_eq!(check(&f, "inf"), None);
        assert_eq!(check(&f, "infinity"), None);
        assert_eq!(check(&f, "Infinity").as_deref(), Some("Maximum value is 10"));
        assert_eq!(check(&f, "0x10").as_deref(), Some("Maximum value is 10"));
        assert_eq!(check(&f, "0x8"), None);
    }

    #[test]
    fn test_number_unparseable_skips_bounds() {
        let f = field(FieldType::Number).with(FieldUpdate::MinLength(Some(5.0)));
        assert_eq!(check(&f, "abc"), None);
    }

    #[test]
    fn test_number_ignores_format_rule() {
        let f = field(FieldType::Number).with(FieldUpdate::Validation(ValidationRule::Email));
        assert_eq!(check(&f, "42"), None);
    }

    #[test]
    fn test_text_length_bounds() {
        let f = field(FieldType::Text).with(FieldUpdate::MinLength(Some(3.0)));
        assert_eq!(check(&f, "ab").as_deref(), Some("Minimum length is 3"));
        assert_eq!(check(&f, "abc"), None);

        let f = field(FieldType::Textarea).with(FieldUpdate::MaxLength(Some(4.0)));
        assert_eq!(check(&f, "abcde").as_deref(), Some("Maximum length is 4"));
    }

    #[test]
    fn test_email_format() {
        let f = field(FieldType::Text).with(FieldUpdate::Validation(ValidationRule::Email));
        assert_eq!(check(&f, "not-an-email").as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(check(&f, "a@b.co"), None);
        assert!(check(&f, "a b@c.de").is_some());
    }

    #[test]
    fn test_password_format() {
        let f = field(FieldType::Text).with(FieldUpdate::Validation(ValidationRule::Password));
        assert_eq!(check(&f, "weak").as_deref(), Some(PASSWORD_MESSAGE));
        assert_eq!(check(&f, "Str0ng!Pass"), None);
    }

    #[test]
    fn test_password_predicate() {
        assert!(is_strong_password("Abcdef1!"));
        assert!(!is_strong_password("Abcde1!"));
        assert!(!is_strong_password("abcdef1!"));
        assert!(!is_strong_password("ABCDEF1!"));
        assert!(!is_strong_password("Abcdefg!"));
        assert!(!is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("Abcdef1!#"));
    }

    #[test]
    fn test_bounds_and_format_both_apply() {
        let f = field(FieldType::Text)
            .with(FieldUpdate::Validation(ValidationRule::Password))
            .with(FieldUpdate::MinLength(Some(12.0)));
        assert_eq!(check(&f, "Str0ng!Pass").as_deref(), Some("Minimum length is 12"));
        assert_eq!(check(&f, "Str0ng!Passw0rd"), None);
        assert_eq!(check(&f, "weakweakweakweak").as_deref(), Some(PASSWORD_MESSAGE));
    }

    #[test]
    fn test_checkbox_group_required() {
        let f = field(FieldType::Checkbox)
            .with(FieldUpdate::Options(vec!["x".into(), "y".into()]))
            .with(FieldUpdate::Required(true));
        assert_eq!(
            check(&f, Vec::<String>::new()).as_deref(),
            Some(SELECT_ONE_MESSAGE)
        );
        assert_eq!(check(&f, vec!["x".to_string()]), None);
        assert_eq!(validate_definition(&f, None).as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_checkbox_group_counts_items() {
        let f = field(FieldType::Checkbox)
            .with(FieldUpdate::Options(vec!["x".into(), "y".into(), "z".into()]))
            .with(FieldUpdate::MaxLength(Some(2.0)));
        let all = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        assert_eq!(check(&f, all).as_deref(), Some("Maximum length is 2"));
    }

    #[test]
    fn test_single_checkbox_required() {
        let f = field(FieldType::Checkbox).with(FieldUpdate::Required(true));
        assert_eq!(check(&f, false).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(check(&f, true), None);
    }

    #[test]
    fn test_required_short_circuits() {
        let f = field(FieldType::Text)
            .with(FieldUpdate::Required(true))
            .with(FieldUpdate::Validation(ValidationRule::Email));
        assert_eq!(check(&f, "").as_deref(), Some(REQUIRED_MESSAGE));
    }
}
