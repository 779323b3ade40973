//! Schema descriptors for tool inputs and outputs
//!
//! A `Schema` is pure data: an ordered list of field specs with declared
//! types and optional constraints. Schemas are checked for internal
//! consistency once at registration time, so a malformed schema fails the
//! process at startup instead of surfacing mid-request.

use regex::Regex;
use serde_json::{json, Map, Value};

/// Declared type of a schema field.
///
/// No implicit coercion is performed between types: an integer is never
/// accepted where a boolean is required. The only widening is `Nullable`,
/// which additionally accepts JSON null.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
    Nullable(Box<FieldType>),
}

impl FieldType {
    /// Check whether a JSON value matches this declared type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
            FieldType::Nullable(inner) => value.is_null() || inner.matches(value),
        }
    }

    /// Two field types are compatible when they are identical or one is a
    /// nullable wrapper of the other.
    pub fn is_compatible(&self, other: &FieldType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (FieldType::Nullable(inner), other) | (other, FieldType::Nullable(inner)) => {
                inner.as_ref() == other
            }
            _ => false,
        }
    }

    /// JSON Schema type name for wire rendering.
    fn json_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Nullable(inner) => inner.json_name(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Nullable(inner) => write!(f, "nullable {}", inner),
            other => f.write_str(other.json_name()),
        }
    }
}

/// Optional constraints on a field.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    /// Allowed literal values; must be non-empty when present.
    pub allowed: Option<Vec<Value>>,
    /// Regex a string value must match.
    pub pattern: Option<Regex>,
    /// Example values shown to clients; must satisfy `allowed` when both set.
    pub examples: Option<Vec<Value>>,
}

/// One named field of a schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub description: Option<String>,
    pub constraints: Constraints,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            description: None,
            constraints: Constraints::default(),
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn allowed(mut self, values: Vec<Value>) -> Self {
        self.constraints.allowed = Some(values);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.constraints.pattern = Some(pattern);
        self
    }

    pub fn examples(mut self, values: Vec<Value>) -> Self {
        self.constraints.examples = Some(values);
        self
    }
}

/// Ordered sequence of field specs describing a tool input or output.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Validate internal consistency. Called once at registration; the
    /// registry rejects descriptors whose schemas fail this check.
    pub fn check(&self) -> std::result::Result<(), String> {
        for (i, spec) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|other| other.name == spec.name) {
                return Err(format!("duplicate field name '{}'", spec.name));
            }
            if let Some(allowed) = &spec.constraints.allowed {
                if allowed.is_empty() {
                    return Err(format!("empty enum for field '{}'", spec.name));
                }
                for value in allowed {
                    if !spec.field_type.matches(value) {
                        return Err(format!(
                            "enum value {} for field '{}' does not match declared type {}",
                            value, spec.name, spec.field_type
                        ));
                    }
                }
            }
            if let Some(examples) = &spec.constraints.examples {
                for example in examples {
                    if !spec.field_type.matches(example) {
                        return Err(format!(
                            "example {} for field '{}' does not match declared type {}",
                            example, spec.name, spec.field_type
                        ));
                    }
                    if let Some(allowed) = &spec.constraints.allowed {
                        if !allowed.contains(example) {
                            return Err(format!(
                                "example {} for field '{}' is not an allowed value",
                                example, spec.name
                            ));
                        }
                    }
                }
            }
            if spec.constraints.pattern.is_some() {
                let is_string = match &spec.field_type {
                    FieldType::String => true,
                    FieldType::Nullable(inner) => **inner == FieldType::String,
                    _ => false,
                };
                if !is_string {
                    return Err(format!(
                        "pattern constraint on non-string field '{}'",
                        spec.name
                    ));
                }
            }
        }
        Ok(())
    }

    /// Render as a JSON Schema object for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in &self.fields {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(spec.field_type.json_name()));
            if let Some(description) = &spec.description {
                property.insert("description".to_string(), json!(description));
            }
            if let Some(allowed) = &spec.constraints.allowed {
                property.insert("enum".to_string(), json!(allowed));
            }
            if let Some(pattern) = &spec.constraints.pattern {
                property.insert("pattern".to_string(), json!(pattern.as_str()));
            }
            if let Some(examples) = &spec.constraints.examples {
                property.insert("examples".to_string(), json!(examples));
            }
            properties.insert(spec.name.clone(), Value::Object(property));
            if spec.required {
                required.push(json!(spec.name));
            }
        }
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_matching() {
        assert!(FieldType::String.matches(&json!("hi")));
        assert!(!FieldType::String.matches(&json!(1)));
        assert!(FieldType::Integer.matches(&json!(42)));
        assert!(!FieldType::Integer.matches(&json!(4.2)));
        assert!(FieldType::Float.matches(&json!(4.2)));
        assert!(FieldType::Float.matches(&json!(42)));
        assert!(!FieldType::Boolean.matches(&json!(1)));
        assert!(FieldType::Nullable(Box::new(FieldType::String)).matches(&Value::Null));
        assert!(FieldType::Nullable(Box::new(FieldType::String)).matches(&json!("x")));
        assert!(!FieldType::Nullable(Box::new(FieldType::String)).matches(&json!(1)));
    }

    #[test]
    fn test_type_compatibility() {
        let nullable_string = FieldType::Nullable(Box::new(FieldType::String));
        assert!(FieldType::String.is_compatible(&FieldType::String));
        assert!(nullable_string.is_compatible(&FieldType::String));
        assert!(FieldType::String.is_compatible(&nullable_string));
        assert!(!FieldType::Integer.is_compatible(&FieldType::Boolean));
        assert!(!nullable_string.is_compatible(&FieldType::Integer));
    }

    #[test]
    fn test_check_rejects_duplicate_field_names() {
        let schema = Schema::new(vec![
            FieldSpec::new("location", FieldType::String, true),
            FieldSpec::new("location", FieldType::String, false),
        ]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_rejects_empty_enum() {
        let schema = Schema::new(vec![
            FieldSpec::new("condition", FieldType::String, true).allowed(vec![])
        ]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_rejects_example_outside_enum() {
        let schema = Schema::new(vec![FieldSpec::new("condition", FieldType::String, true)
            .allowed(vec![json!("Sunny")])
            .examples(vec![json!("Rainy")])]);
        assert!(schema.check().is_err());
    }

    #[test]
    fn test_check_accepts_consistent_schema() {
        let schema = Schema::new(vec![
            FieldSpec::new("condition", FieldType::String, true)
                .allowed(vec![json!("Sunny"), json!("Rainy")])
                .examples(vec![json!("Sunny")]),
            FieldSpec::new("temperature", FieldType::Integer, false),
        ]);
        assert!(schema.check().is_ok());
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = Schema::new(vec![
            FieldSpec::new("location", FieldType::String, true)
                .describe("City name")
                .examples(vec![json!("Bengaluru")]),
            FieldSpec::new("verbose", FieldType::Boolean, false),
        ]);
        let rendered = schema.to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["location"]["type"], "string");
        assert_eq!(rendered["properties"]["location"]["description"], "City name");
        assert_eq!(rendered["required"], json!(["location"]));
    }
}
