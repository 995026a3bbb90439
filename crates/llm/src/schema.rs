//! Response Schema Descriptor
//!
//! A vendor-neutral description of the JSON a model must return. Providers
//! translate it into their own dialect (OpenAPI-style upper-case types for
//! Gemini, JSON Schema for OpenAI).

use serde_json::{json, Map, Value};

/// Primitive and composite schema types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    /// JSON Schema spelling (`"object"`, `"integer"`, ...).
    pub fn json_name(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }

    /// OpenAPI enum spelling used by Gemini (`"OBJECT"`, `"INTEGER"`, ...).
    pub fn openapi_name(&self) -> &'static str {
        match self {
            SchemaType::String => "STRING",
            SchemaType::Number => "NUMBER",
            SchemaType::Integer => "INTEGER",
            SchemaType::Boolean => "BOOLEAN",
            SchemaType::Object => "OBJECT",
            SchemaType::Array => "ARRAY",
        }
    }
}

/// Schema node. Object properties keep their declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub schema_type: SchemaType,
    pub description: Option<String>,
    pub properties: Vec<(String, ResponseSchema)>,
    pub required: Vec<String>,
    pub items: Option<Box<ResponseSchema>>,
    pub enum_values: Option<Vec<String>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl ResponseSchema {
    fn leaf(schema_type: SchemaType, description: Option<&str>) -> Self {
        Self {
            schema_type,
            description: description.map(|s| s.to_string()),
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
            enum_values: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn string(description: Option<&str>) -> Self {
        Self::leaf(SchemaType::String, description)
    }

    pub fn number(description: Option<&str>) -> Self {
        Self::leaf(SchemaType::Number, description)
    }

    pub fn integer(description: Option<&str>) -> Self {
        Self::leaf(SchemaType::Integer, description)
    }

    pub fn boolean(description: Option<&str>) -> Self {
        Self::leaf(SchemaType::Boolean, description)
    }

    /// Object schema; properties are emitted in the given order.
    pub fn object(
        description: Option<&str>,
        properties: Vec<(&str, ResponseSchema)>,
        required: &[&str],
    ) -> Self {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
            ..Self::leaf(SchemaType::Object, description)
        }
    }

    pub fn array(description: Option<&str>, items: ResponseSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array, description)
        }
    }

    /// Restrict a string schema to a closed set of values.
    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Bound a numeric schema to `[min, max]`.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }

    /// Look up a direct property by name.
    pub fn property(&self, name: &str) -> Option<&ResponseSchema> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, schema)| schema)
    }

    /// Render as standard JSON Schema.
    pub fn to_json_schema(&self) -> Value {
        self.render(SchemaType::json_name, false)
    }

    /// Render in Gemini's OpenAPI subset, including `propertyOrdering`.
    pub fn to_gemini_schema(&self) -> Value {
        self.render(SchemaType::openapi_name, true)
    }

    fn render(&self, type_name: fn(&SchemaType) -> &'static str, ordering: bool) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(type_name(&self.schema_type)));
        if let Some(desc) = &self.description {
            out.insert("description".to_string(), json!(desc));
        }
        if let Some(values) = &self.enum_values {
            out.insert("enum".to_string(), json!(values));
        }
        if let Some(min) = self.minimum {
            out.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = self.maximum {
            out.insert("maximum".to_string(), json!(max));
        }
        if self.schema_type == SchemaType::Object {
            let props: Map<String, Value> = self
                .properties
                .iter()
                .map(|(name, schema)| (name.clone(), schema.render(type_name, ordering)))
                .collect();
            out.insert("properties".to_string(), Value::Object(props));
            if !self.required.is_empty() {
                out.insert("required".to_string(), json!(self.required));
            }
            if ordering {
                let order: Vec<&str> = self.properties.iter().map(|(n, _)| n.as_str()).collect();
                out.insert("propertyOrdering".to_string(), json!(order));
            }
        }
        if let Some(items) = &self.items {
            out.insert("items".to_string(), items.render(type_name, ordering));
        }
        Value::Object(out)
    }
}
