//! Attribute schemas and the per-read resource data bag.
//!
//! A data source declares its arguments and computed attributes as a
//! [`Resource`]. [`ResourceData`] holds the configured arguments plus whatever
//! the read handler sets, and checks every value against that declaration.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
    List,
    Map,
}

impl AttributeType {
    /// The value Terraform treats as "not set" for this type.
    pub fn zero_value(self) -> Value {
        match self {
            AttributeType::String => Value::String(String::new()),
            AttributeType::Int => Value::from(0),
            AttributeType::List => Value::Array(Vec::new()),
            AttributeType::Map => Value::Object(Map::new()),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::Int => "int",
            AttributeType::List => "list",
            AttributeType::Map => "map",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("attribute {key} expects a {expected} value")]
    TypeMismatch { key: String, expected: AttributeType },

    #[error("attribute {0} is computed and cannot be configured")]
    NotConfigurable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub ty: AttributeType,
    pub optional: bool,
    pub computed: bool,
    pub description: String,
    /// Element schema for lists of objects.
    pub elem: Option<Resource>,
}

impl Attribute {
    fn new(ty: AttributeType, optional: bool, description: impl Into<String>) -> Self {
        Self {
            ty,
            optional,
            computed: !optional,
            description: description.into(),
            elem: None,
        }
    }

    pub fn optional_string(description: impl Into<String>) -> Self {
        Self::new(AttributeType::String, true, description)
    }

    pub fn optional_int(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Int, true, description)
    }

    pub fn computed_string(description: impl Into<String>) -> Self {
        Self::new(AttributeType::String, false, description)
    }

    pub fn computed_int(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Int, false, description)
    }

    pub fn computed_map(description: impl Into<String>) -> Self {
        Self::new(AttributeType::Map, false, description)
    }

    pub fn computed_list(description: impl Into<String>, elem: Resource) -> Self {
        Self {
            elem: Some(elem),
            ..Self::new(AttributeType::List, false, description)
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self.ty, value) {
            (_, Value::Null) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Int, Value::Number(n)) => n.is_i64(),
            (AttributeType::Map, Value::Object(entries)) => {
                entries.values().all(|v| v.is_string() || v.is_null())
            }
            (AttributeType::List, Value::Array(items)) => match &self.elem {
                Some(elem) => items.iter().all(|item| elem.check_object(item).is_ok()),
                None => true,
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    pub attributes: BTreeMap<String, Attribute>,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    fn check(&self, key: &str, value: &Value) -> Result<&Attribute, SchemaError> {
        let attribute = self
            .attribute(key)
            .ok_or_else(|| SchemaError::UnknownAttribute(key.to_string()))?;
        if !attribute.accepts(value) {
            return Err(SchemaError::TypeMismatch {
                key: key.to_string(),
                expected: attribute.ty,
            });
        }
        Ok(attribute)
    }

    fn check_object(&self, value: &Value) -> Result<(), SchemaError> {
        let object = value.as_object().ok_or_else(|| SchemaError::TypeMismatch {
            key: "<element>".to_string(),
            expected: AttributeType::Map,
        })?;
        for (key, value) in object {
            self.check(key, value)?;
        }
        Ok(())
    }
}

/// Configuration and computed state for one read.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Resource,
    config: Map<String, Value>,
    state: Map<String, Value>,
    id: Option<String>,
}

impl ResourceData {
    pub fn from_config(schema: Resource, config: Map<String, Value>) -> Result<Self, SchemaError> {
        for (key, value) in &config {
            let attribute = schema.check(key, value)?;
            if !attribute.optional {
                return Err(SchemaError::NotConfigurable(key.clone()));
            }
        }

        Ok(Self {
            schema,
            config,
            state: Map::new(),
            id: None,
        })
    }

    /// Returns the value of `key`, or the type's zero value when unset.
    pub fn get(&self, key: &str) -> Value {
        let Some(attribute) = self.schema.attribute(key) else {
            return Value::Null;
        };

        match self.state.get(key).or_else(|| self.config.get(key)) {
            Some(Value::Null) | None => attribute.ty.zero_value(),
            Some(value) => value.clone(),
        }
    }

    /// Like [`get`](Self::get), but `None` when the value is the zero value.
    pub fn get_ok(&self, key: &str) -> Option<Value> {
        let attribute = self.schema.attribute(key)?;
        let value = self.get(key);
        (value != attribute.ty.zero_value()).then_some(value)
    }

    pub fn set(&mut self, key: &str, value: Value) -> Result<(), SchemaError> {
        self.schema.check(key, &value)?;
        self.state.insert(key.to_string(), value);
        Ok(())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Arguments and computed attributes merged, with the synthetic `id` last.
    pub fn state(&self) -> Value {
        let mut merged = self.config.clone();
        merged.extend(self.state.clone());
        if let Some(id) = &self.id {
            merged.insert("id".to_string(), Value::String(id.clone()));
        }
        Value::Object(merged)
    }
}
