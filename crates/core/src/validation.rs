//! Bridges `validator` derive output into [`FieldError`]s.

use validator::{ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldError};

/// Flatten `validator` errors into field errors, sorted by field name so
/// responses are stable.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(move |e| FieldError::new(field.clone(), describe(e)))
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Run derive validation and append any failures to `errors`.
pub fn collect<T: validator::Validate>(value: &T, errors: &mut Vec<FieldError>) {
    if let Err(e) = value.validate() {
        errors.extend(field_errors(&e));
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let param = |name: &str| err.params.get(name).map(|v| v.to_string());
    match &*err.code {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max} characters"),
            (None, Some(max)) => format!("must be at most {max} characters"),
            (Some(min), None) => format!("must be at least {min} characters"),
            (None, None) => "has an invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (None, None) => "is out of range".to_string(),
        },
        "email" => "must be a valid email address".to_string(),
        other => format!("failed validation: {other}"),
    }
}

/// Trim a string field; blank values become `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Record a "required" failure when `value` is absent.
pub fn require<'a, T>(
    value: &'a Option<T>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a T> {
    if value.is_none() {
        errors.push(FieldError::new(field, "is required"));
    }
    value.as_ref()
}

/// Record a parse failure against `field`, keeping the parsed value otherwise.
pub fn parsed<T>(
    result: Result<T, CoreError>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(CoreError::Validation(msg)) => {
            errors.push(FieldError::new(field, msg));
            None
        }
        Err(other) => {
            errors.push(FieldError::new(field, other.to_string()));
            None
        }
    }
}
