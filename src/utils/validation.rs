//! Form-shape checks done before anything is sent to the backend.
//!
//! Forms derive [`validator::Validate`]; this module holds the shared custom
//! rule and turns a failed validation into the text of a flash message.

use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;

/// Rejects values that are empty once trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Every distinct field message, ordered by field name so the text is stable.
pub fn message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages: Vec<String> = Vec::new();
    let all = fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        });
    for text in all {
        if !messages.contains(&text) {
            messages.push(text);
        }
    }

    if messages.is_empty() {
        "Please check the form and try again".to_string()
    } else {
        messages.join("; ")
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::BadRequest(message(&errors))
    }
}
