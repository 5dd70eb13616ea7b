//! Bridge from `validator` derive errors to [`CoreError`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived [`Validate`] rules for `input`, mapping failures to
/// [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|e| CoreError::Validation(describe(&e)))
}

/// Reject NUL bytes in a text field. PostgreSQL `text` cannot store them,
/// so without this check they would surface as a store failure.
pub fn reject_nul(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    if value.is_some_and(|v| v.contains('\0')) {
        return Err(CoreError::Validation(format!(
            "{field} must not contain NUL bytes"
        )));
    }
    Ok(())
}

/// Render field errors as `field: message` pairs, sorted by field name so
/// the output is stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(max = 3))]
        alloy: String,
        #[validate(length(max = 3, message = "too long"))]
        customer: Option<String>,
    }

    #[test]
    fn nul_bytes_are_rejected() {
        assert!(reject_nul("note", None).is_ok());
        assert!(reject_nul("note", Some("plain text")).is_ok());

        let err = reject_nul("note", Some("a\0b")).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: note must not contain NUL bytes");
    }

    #[test]
    fn valid_input_passes() {
        let sample = Sample {
            alloy: "718".into(),
            customer: None,
        };
        assert!(validate_input(&sample).is_ok());
    }

    #[test]
    fn errors_are_sorted_and_use_messages() {
        let sample = Sample {
            alloy: "Ti-6Al-4V".into(),
            customer: Some("Acme Forge".into()),
        };
        let err = validate_input(&sample).unwrap_err();
        let CoreError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "alloy: length; customer: too long");
    }
}
