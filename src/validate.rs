//! Input and output validation against schema descriptors
//!
//! Inputs are checked before a handler runs; outputs are checked before a
//! result is wrapped for the wire, so a malformed handler return never
//! reaches the client unmarked.

use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::schema::Schema;

/// Validate a request's arguments against a tool's input schema.
///
/// Extra fields not named by the schema are ignored; the policy is
/// permissive on unknowns and strict on declared fields.
pub fn validate_input(
    schema: &Schema,
    args: &Map<String, Value>,
) -> std::result::Result<(), ToolError> {
    validate(schema, args)
}

/// Validate a handler's returned mapping against the output schema.
pub fn validate_output(
    schema: &Schema,
    result: &Map<String, Value>,
) -> std::result::Result<(), ToolError> {
    validate(schema, result).map_err(|err| ToolError::Output(err.to_string()))
}

fn validate(schema: &Schema, map: &Map<String, Value>) -> std::result::Result<(), ToolError> {
    for spec in &schema.fields {
        let value = match map.get(&spec.name) {
            Some(value) => value,
            None => {
                if spec.required {
                    return Err(ToolError::MissingRequiredField {
                        field: spec.name.clone(),
                    });
                }
                continue;
            }
        };
        if !spec.field_type.matches(value) {
            return Err(ToolError::TypeMismatch {
                field: spec.name.clone(),
                expected: spec.field_type.to_string(),
                actual: json_type_name(value).to_string(),
            });
        }
        if let Some(allowed) = &spec.constraints.allowed {
            if !allowed.contains(value) {
                return Err(ToolError::EnumViolation {
                    field: spec.name.clone(),
                    allowed: allowed.iter().map(Value::to_string).collect(),
                    actual: value.to_string(),
                });
            }
        }
        if let Some(pattern) = &spec.constraints.pattern {
            if let Some(text) = value.as_str() {
                if !pattern.is_match(text) {
                    return Err(ToolError::PatternMismatch {
                        field: spec.name.clone(),
                        pattern: pattern.as_str().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType};
    use regex::Regex;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn location_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("location", FieldType::String, true),
            FieldSpec::new("verbose", FieldType::Boolean, false),
        ])
    }

    #[test]
    fn test_missing_required_field_names_the_field() {
        let err = validate_input(&location_schema(), &args(json!({}))).unwrap_err();
        match err {
            ToolError::MissingRequiredField { field } => assert_eq!(field, "location"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_mismatch_is_not_coerced() {
        let err =
            validate_input(&location_schema(), &args(json!({"location": 42}))).unwrap_err();
        assert!(matches!(err, ToolError::TypeMismatch { .. }));

        // Integer is never accepted where a boolean is required.
        let err = validate_input(
            &location_schema(),
            &args(json!({"location": "Bengaluru", "verbose": 1})),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::TypeMismatch { ref field, .. } if field == "verbose"));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let result = validate_input(
            &location_schema(),
            &args(json!({"location": "Bengaluru", "unexpected": [1, 2, 3]})),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_nullable_accepts_null_and_inner_type() {
        let schema = Schema::new(vec![FieldSpec::new(
            "note",
            FieldType::Nullable(Box::new(FieldType::String)),
            true,
        )]);
        assert!(validate_input(&schema, &args(json!({"note": null}))).is_ok());
        assert!(validate_input(&schema, &args(json!({"note": "hi"}))).is_ok());
        assert!(validate_input(&schema, &args(json!({"note": 7}))).is_err());
    }

    #[test]
    fn test_enum_violation() {
        let schema = Schema::new(vec![FieldSpec::new("condition", FieldType::String, true)
            .allowed(vec![json!("Sunny"), json!("Rainy")])]);
        assert!(validate_input(&schema, &args(json!({"condition": "Sunny"}))).is_ok());
        let err =
            validate_input(&schema, &args(json!({"condition": "Blizzard"}))).unwrap_err();
        assert!(matches!(err, ToolError::EnumViolation { .. }));
    }

    #[test]
    fn test_pattern_mismatch() {
        let schema = Schema::new(vec![FieldSpec::new("code", FieldType::String, true)
            .pattern(Regex::new(r"^[A-Z]{3}$").expect("valid regex"))]);
        assert!(validate_input(&schema, &args(json!({"code": "BLR"}))).is_ok());
        assert!(validate_input(&schema, &args(json!({"code": "blr"}))).is_err());
    }

    #[test]
    fn test_output_failures_are_wrapped() {
        let err = validate_output(&location_schema(), &args(json!({}))).unwrap_err();
        match err {
            ToolError::Output(message) => assert!(message.contains("location")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
