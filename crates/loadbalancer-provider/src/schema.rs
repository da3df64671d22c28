//! Schema types for resources, data sources and the provider block

use crate::error::{ProviderError, Result};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int,
    String,
    Bool,
    List,
    Set,
}

impl ValueType {
    /// Value reported for an attribute that was never set
    pub fn zero_value(&self) -> Value {
        match self {
            ValueType::Int => json!(0),
            ValueType::String => json!(""),
            ValueType::Bool => json!(false),
            ValueType::List | ValueType::Set => json!([]),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::Int => value.is_i64() || value.is_u64(),
            ValueType::String => value.is_string(),
            ValueType::Bool => value.is_boolean(),
            ValueType::List | ValueType::Set => value.is_array(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Int => "integer",
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::List => "list",
            ValueType::Set => "set",
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single schema attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exactly_one_of: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            sensitive: false,
            default: None,
            exactly_one_of: Vec::new(),
            min_items: None,
            elem: None,
            description: None,
        }
    }

    pub fn required(value_type: ValueType) -> Self {
        Self {
            required: true,
            ..Self::new(value_type)
        }
    }

    pub fn optional(value_type: ValueType) -> Self {
        Self {
            optional: true,
            ..Self::new(value_type)
        }
    }

    pub fn computed(value_type: ValueType) -> Self {
        Self {
            computed: true,
            ..Self::new(value_type)
        }
    }

    /// Optional attribute whose value the API fills in when unset
    pub fn optional_computed(value_type: ValueType) -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::new(value_type)
        }
    }

    pub fn required_int() -> Self {
        Self::required(ValueType::Int)
    }

    pub fn required_string() -> Self {
        Self::required(ValueType::String)
    }

    pub fn optional_int() -> Self {
        Self::optional(ValueType::Int)
    }

    pub fn optional_string() -> Self {
        Self::optional(ValueType::String)
    }

    pub fn optional_bool() -> Self {
        Self::optional(ValueType::Bool)
    }

    pub fn computed_int() -> Self {
        Self::computed(ValueType::Int)
    }

    pub fn computed_string() -> Self {
        Self::computed(ValueType::String)
    }

    pub fn computed_bool() -> Self {
        Self::computed(ValueType::Bool)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn exactly_one_of(mut self, keys: &[&str]) -> Self {
        self.exactly_one_of = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn min_items(mut self, min_items: usize) -> Self {
        self.min_items = Some(min_items);
        self
    }

    pub fn with_elem(mut self, elem: Block) -> Self {
        self.elem = Some(elem);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn zero_value(&self) -> Value {
        self.value_type.zero_value()
    }

    /// Compare two values of this attribute
    ///
    /// Missing and null values equal the zero value, and sets compare
    /// without regard to element order.
    pub fn values_equal(&self, a: Option<&Value>, b: Option<&Value>) -> bool {
        self.canonical(a) == self.canonical(b)
    }

    fn canonical(&self, value: Option<&Value>) -> Value {
        let value = match value {
            None | Some(Value::Null) => return self.zero_value(),
            Some(value) => value,
        };

        match (self.value_type, value) {
            (ValueType::List, Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| canonical_element(self.elem.as_ref(), item))
                    .collect(),
            ),
            (ValueType::Set, Value::Array(items)) => {
                let mut items: Vec<Value> = items
                    .iter()
                    .map(|item| canonical_element(self.elem.as_ref(), item))
                    .collect();
                items.sort_by_key(|item| item.to_string());
                Value::Array(items)
            }
            _ => value.clone(),
        }
    }
}

fn canonical_element(elem: Option<&Block>, item: &Value) -> Value {
    match (elem, item) {
        (Some(block), Value::Object(fields)) => {
            let mut canonical = Map::new();
            for (name, attr) in block.iter() {
                canonical.insert(name.clone(), attr.canonical(fields.get(name)));
            }
            Value::Object(canonical)
        }
        _ => item.clone(),
    }
}

/// A set of named attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Block {
    attributes: BTreeMap<String, Attribute>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Attribute)> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Check the block for contradictory attribute definitions
    pub fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<()> {
        for (name, attr) in &self.attributes {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            let invalid = |reason: &str| ProviderError::InvalidSchema {
                path: path.clone(),
                reason: reason.to_string(),
            };

            if attr.required && (attr.optional || attr.computed) {
                return Err(invalid("required cannot be combined with optional or computed"));
            }
            if !attr.required && !attr.optional && !attr.computed {
                return Err(invalid("one of required, optional or computed must be set"));
            }
            if attr.default.is_some() && (attr.required || attr.computed) {
                return Err(invalid("default is only allowed on optional, non-computed attributes"));
            }
            if attr.force_new && attr.computed && !attr.optional {
                return Err(invalid("computed-only attributes cannot force a new resource"));
            }
            if let Some(default) = &attr.default {
                if !attr.value_type.matches(default) {
                    return Err(invalid("default does not match the attribute type"));
                }
            }

            let is_collection = matches!(attr.value_type, ValueType::List | ValueType::Set);
            if attr.min_items.is_some() && !is_collection {
                return Err(invalid("min_items is only allowed on lists and sets"));
            }
            match (&attr.elem, is_collection) {
                (Some(elem), true) => elem.validate_at(&path)?,
                (None, true) => return Err(invalid("lists and sets need an element block")),
                (Some(_), false) => {
                    return Err(invalid("only lists and sets may declare an element block"));
                }
                (None, false) => {}
            }

            if !attr.exactly_one_of.is_empty() {
                if !attr.exactly_one_of.iter().any(|k| k == name) {
                    return Err(invalid("exactly_one_of must include the attribute itself"));
                }
                if let Some(missing) = attr
                    .exactly_one_of
                    .iter()
                    .find(|k| !self.attributes.contains_key(k.as_str()))
                {
                    return Err(invalid(&format!(
                        "exactly_one_of references unknown attribute '{}'",
                        missing
                    )));
                }
                if attr.required {
                    return Err(invalid("exactly_one_of attributes must be optional"));
                }
            }
        }

        Ok(())
    }
}
