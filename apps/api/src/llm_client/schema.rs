//! Response schemas — typed shape descriptions for schema-constrained completions.
//!
//! A schema is an ordered set of named fields. Each field is a string, a list of
//! strings, a nested object, or a list of nested objects. The schema renders to
//! JSON Schema (sent to the model) and validates the JSON that comes back.
//!
//! Validation rules:
//! - the value must be an object;
//! - every top-level field must be present and non-null;
//! - nested fields are optional, but type-checked when present.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Shape of a single schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    String,
    StringList,
    Object(ResponseSchema),
    ObjectList(ResponseSchema),
}

impl FieldShape {
    fn expected(&self) -> &'static str {
        match self {
            FieldShape::String => "string",
            FieldShape::StringList => "array of strings",
            FieldShape::Object(_) => "object",
            FieldShape::ObjectList(_) => "array of objects",
        }
    }

    fn to_json_schema(&self) -> Value {
        match self {
            FieldShape::String => json!({ "type": "string" }),
            FieldShape::StringList => {
                json!({ "type": "array", "items": { "type": "string" } })
            }
            FieldShape::Object(schema) => schema.render(false),
            FieldShape::ObjectList(schema) => {
                json!({ "type": "array", "items": schema.render(false) })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("expected a JSON object at `{path}`")]
    NotAnObject { path: String },

    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("field `{path}` should be {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("structured output returned where free text was requested")]
    UnexpectedStructure,
}

/// An ordered object schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseSchema {
    fields: Vec<(String, FieldShape)>,
}

impl ResponseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(self, name: &str) -> Self {
        self.field(name, FieldShape::String)
    }

    pub fn strings(self, name: &str) -> Self {
        self.field(name, FieldShape::StringList)
    }

    pub fn object(self, name: &str, schema: ResponseSchema) -> Self {
        self.field(name, FieldShape::Object(schema))
    }

    pub fn objects(self, name: &str, schema: ResponseSchema) -> Self {
        self.field(name, FieldShape::ObjectList(schema))
    }

    fn field(mut self, name: &str, shape: FieldShape) -> Self {
        self.fields.push((name.to_string(), shape));
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Renders the schema as a JSON Schema object. Top-level fields are required.
    pub fn to_json_schema(&self) -> Value {
        self.render(true)
    }

    fn render(&self, top_level: bool) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, shape)| (name.clone(), shape.to_json_schema()))
            .collect();

        let mut schema = json!({ "type": "object", "properties": properties });
        if top_level {
            schema["required"] = json!(self.field_names().collect::<Vec<_>>());
        }
        schema
    }

    /// Checks that `value` has the shape this schema describes.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self.validate_at(value, "$", true)
    }

    fn validate_at(
        &self,
        value: &Value,
        path: &str,
        top_level: bool,
    ) -> Result<(), SchemaViolation> {
        let object = value.as_object().ok_or_else(|| SchemaViolation::NotAnObject {
            path: path.to_string(),
        })?;

        for (name, shape) in &self.fields {
            let field_path = format!("{path}.{name}");
            match object.get(name) {
                None | Some(Value::Null) if top_level => {
                    return Err(SchemaViolation::MissingField { path: field_path })
                }
                None | Some(Value::Null) => continue,
                Some(field) => validate_field(shape, field, &field_path)?,
            }
        }

        Ok(())
    }
}

fn validate_field(shape: &FieldShape, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let wrong_type = || SchemaViolation::WrongType {
        path: path.to_string(),
        expected: shape.expected(),
    };

    match shape {
        FieldShape::String => value.as_str().map(|_| ()).ok_or_else(wrong_type),
        FieldShape::StringList => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            if items.iter().all(Value::is_string) {
                Ok(())
            } else {
                Err(wrong_type())
            }
        }
        FieldShape::Object(schema) => schema.validate_at(value, path, false),
        FieldShape::ObjectList(schema) => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            items
                .iter()
                .enumerate()
                .try_for_each(|(i, item)| schema.validate_at(item, &format!("{path}[{i}]"), false))
        }
    }
}

impl Serialize for ResponseSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thesis_schema() -> ResponseSchema {
        ResponseSchema::new()
            .object(
                "investment_thesis",
                ResponseSchema::new().string("core_thesis").string("time_horizon"),
            )
            .objects(
                "growth_catalysts",
                ResponseSchema::new().string("catalyst").string("timeline"),
            )
            .strings("monitoring_metrics")
    }

    #[test]
    fn test_renders_json_schema_with_required_top_level() {
        let rendered = thesis_schema().to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(
            rendered["required"],
            json!(["investment_thesis", "growth_catalysts", "monitoring_metrics"])
        );
        assert_eq!(
            rendered["properties"]["growth_catalysts"]["items"]["properties"]["catalyst"]["type"],
            "string"
        );
        assert_eq!(
            rendered["properties"]["monitoring_metrics"]["items"]["type"],
            "string"
        );
        assert!(rendered["properties"]["investment_thesis"]
            .get("required")
            .is_none());
    }

    #[test]
    fn test_conforming_value_validates() {
        let value = json!({
            "investment_thesis": { "core_thesis": "Durable cash flows", "time_horizon": "5 years" },
            "growth_catalysts": [{ "catalyst": "Cloud", "timeline": "2 years" }],
            "monitoring_metrics": ["Operating margin", "Cloud growth"]
        });
        assert_eq!(thesis_schema().validate(&value), Ok(()));
    }

    #[test]
    fn test_nested_fields_are_optional() {
        let value = json!({
            "investment_thesis": {},
            "growth_catalysts": [{ "catalyst": "Cloud" }],
            "monitoring_metrics": []
        });
        assert!(thesis_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_top_level_field_is_rejected() {
        let value = json!({
            "investment_thesis": { "core_thesis": "x" },
            "growth_catalysts": []
        });
        assert_eq!(
            thesis_schema().validate(&value),
            Err(SchemaViolation::MissingField {
                path: "$.monitoring_metrics".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_type_reports_path() {
        let value = json!({
            "investment_thesis": { "core_thesis": "x" },
            "growth_catalysts": [{ "catalyst": "Cloud" }, { "catalyst": 42 }],
            "monitoring_metrics": []
        });
        assert_eq!(
            thesis_schema().validate(&value),
            Err(SchemaViolation::WrongType {
                path: "$.growth_catalysts[1].catalyst".to_string(),
                expected: "string"
            })
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            thesis_schema().validate(&json!(["not", "an", "object"])),
            Err(SchemaViolation::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_string_list_rejects_mixed_items() {
        let schema = ResponseSchema::new().strings("tags");
        assert!(schema.validate(&json!({ "tags": ["a", 1] })).is_err());
    }
}
