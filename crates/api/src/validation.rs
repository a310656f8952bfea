//! Request validation and the structured validation-error body.

use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Structured validation failure body:
/// `{ message, fieldErrors: [{field, rejectedValue, message}] }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Summary message.
    pub message: String,
    /// One entry per violated constraint.
    #[serde(rename = "fieldErrors")]
    pub field_errors: Vec<FieldError>,
}

/// A single field-level violation.
#[derive(Debug, Serialize)]
pub struct FieldError {
    /// Name of the offending field (wire name).
    pub field: String,
    /// The rejected value, when the validator captured it.
    #[serde(rename = "rejectedValue")]
    pub rejected_value: Option<String>,
    /// Human-readable constraint message.
    pub message: String,
}

/// Flattens `validator` output into the wire body.
#[must_use]
pub fn validation_error_response(errors: &ValidationErrors) -> ErrorResponse {
    let mut field_errors = Vec::new();

    for (field, kind) in errors.errors() {
        if let ValidationErrorsKind::Field(violations) = kind {
            for violation in violations {
                field_errors.push(FieldError {
                    field: field.to_string(),
                    rejected_value: violation.params.get("value").map(|value| match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    }),
                    message: violation
                        .message
                        .clone()
                        .map_or_else(|| violation.code.to_string(), |m| m.into_owned()),
                });
            }
        }
    }

    ErrorResponse {
        message: "Validation failed".to_string(),
        field_errors,
    }
}

/// Builds the wire body for a single hand-rolled violation (used where the
/// constraint is not expressible as a derive attribute, e.g. account type
/// labels).
#[must_use]
pub fn single_field_error(field: &str, rejected: &str, message: &str) -> ErrorResponse {
    ErrorResponse {
        message: "Validation failed".to_string(),
        field_errors: vec![FieldError {
            field: field.to_string(),
            rejected_value: Some(rejected.to_string()),
            message: message.to_string(),
        }],
    }
}

/// Gender labels accepted by the registry.
const GENDERS: [&str; 3] = ["Masculino", "Femenino", "Otro"];

/// Validates the gender label against the accepted set.
///
/// # Errors
///
/// Returns a validation error when the label is not one of
/// `Masculino`, `Femenino`, `Otro`.
pub fn validate_gender(value: &str) -> Result<(), ValidationError> {
    if GENDERS.contains(&value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("genero");
        error.message = Some("gender must be Masculino, Femenino or Otro".into());
        error.add_param("value".into(), &value);
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name must not be empty"))]
        name: String,
        #[validate(custom(function = validate_gender))]
        gender: String,
    }

    #[rstest]
    #[case("Masculino")]
    #[case("Femenino")]
    #[case("Otro")]
    fn test_accepted_genders(#[case] label: &str) {
        assert!(validate_gender(label).is_ok());
    }

    #[rstest]
    #[case("masculino")]
    #[case("F")]
    #[case("")]
    fn test_rejected_genders(#[case] label: &str) {
        assert!(validate_gender(label).is_err());
    }

    #[test]
    fn test_each_violation_becomes_a_field_error() {
        let probe = Probe {
            name: String::new(),
            gender: "F".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let body = validation_error_response(&errors);

        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.field_errors.len(), 2);
        let fields: Vec<&str> = body.field_errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"gender"));

        let gender = body
            .field_errors
            .iter()
            .find(|e| e.field == "gender")
            .unwrap();
        assert_eq!(gender.rejected_value.as_deref(), Some("F"));
        assert!(gender.message.contains("Masculino"));
    }

    #[test]
    fn test_wire_body_shape() {
        let body = single_field_error("tipoCuenta", "Plazo", "account type must be Ahorro or Corriente");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["fieldErrors"][0]["field"], "tipoCuenta");
        assert_eq!(json["fieldErrors"][0]["rejectedValue"], "Plazo");
        assert!(json["fieldErrors"][0]["message"].is_string());
        assert!(json["message"].is_string());
    }
}
