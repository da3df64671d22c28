//! ACL condition/action mapping
//!
//! Configuration describes rules as a list of blocks, each with a `name` and
//! a set of `argument { name, value }` blocks. The API keys each rule's
//! arguments by name:
//!
//! ```text
//! config                                 API
//! condition {                            {
//!   name = "header_matches"        ─►      "name": "header_matches",
//!   argument { name = "header"             "arguments": {
//!              value = "host" }              "header": {"name": "header", "value": "host"}
//! }                                ◄─      }
//!                                        }
//! ```

use crate::error::{ProviderError, Result};
use loadbalancer_sdk::{AclAction, AclArgument, AclCondition};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

pub const CONDITION_KEY: &str = "condition";
pub const ACTION_KEY: &str = "action";
pub const ARGUMENT_KEY: &str = "argument";

trait AclRule: Sized {
    fn from_parts(name: String, arguments: HashMap<String, AclArgument>) -> Self;
    fn name(&self) -> &str;
    fn arguments(&self) -> &HashMap<String, AclArgument>;
}

impl AclRule for AclCondition {
    fn from_parts(name: String, arguments: HashMap<String, AclArgument>) -> Self {
        AclCondition { name, arguments }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> &HashMap<String, AclArgument> {
        &self.arguments
    }
}

impl AclRule for AclAction {
    fn from_parts(name: String, arguments: HashMap<String, AclArgument>) -> Self {
        AclAction { name, arguments }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> &HashMap<String, AclArgument> {
        &self.arguments
    }
}

pub fn expand_acl_conditions(raw: &[Value]) -> Result<Vec<AclCondition>> {
    expand_rules(CONDITION_KEY, raw)
}

pub fn flatten_acl_conditions(conditions: &[AclCondition]) -> Vec<Value> {
    flatten_rules(conditions)
}

pub fn expand_acl_actions(raw: &[Value]) -> Result<Vec<AclAction>> {
    expand_rules(ACTION_KEY, raw)
}

pub fn flatten_acl_actions(actions: &[AclAction]) -> Vec<Value> {
    flatten_rules(actions)
}

/// Collect argument blocks into a name-keyed map; a repeated name overwrites
/// the earlier entry.
pub fn expand_acl_arguments(raw: &[Value]) -> Result<HashMap<String, AclArgument>> {
    expand_arguments(ARGUMENT_KEY, raw)
}

pub fn flatten_acl_arguments(arguments: &HashMap<String, AclArgument>) -> Vec<Value> {
    let mut arguments: Vec<&AclArgument> = arguments.values().collect();
    arguments.sort_by(|a, b| a.name.cmp(&b.name));

    arguments
        .into_iter()
        .map(|argument| json!({"name": argument.name, "value": argument.value}))
        .collect()
}

fn expand_rules<T: AclRule>(key: &str, raw: &[Value]) -> Result<Vec<T>> {
    raw.iter()
        .enumerate()
        .map(|(index, item)| {
            let path = format!("{}.{}", key, index);
            let fields = as_block(&path, item)?;
            let name = string_field(&path, fields, "name")?;
            let arguments = match fields.get(ARGUMENT_KEY) {
                None | Some(Value::Null) => HashMap::new(),
                Some(Value::Array(items)) => {
                    expand_arguments(&format!("{}.{}", path, ARGUMENT_KEY), items)?
                }
                Some(_) => {
                    return Err(ProviderError::TypeMismatch {
                        key: format!("{}.{}", path, ARGUMENT_KEY),
                        expected: "set",
                    });
                }
            };

            Ok(T::from_parts(name, arguments))
        })
        .collect()
}

fn flatten_rules<T: AclRule>(rules: &[T]) -> Vec<Value> {
    rules
        .iter()
        .map(|rule| {
            json!({
                "name": rule.name(),
                "argument": flatten_acl_arguments(rule.arguments()),
            })
        })
        .collect()
}

fn expand_arguments(key: &str, raw: &[Value]) -> Result<HashMap<String, AclArgument>> {
    let mut arguments = HashMap::new();
    for (index, item) in raw.iter().enumerate() {
        let path = format!("{}.{}", key, index);
        let fields = as_block(&path, item)?;
        let name = string_field(&path, fields, "name")?;
        let value = string_field(&path, fields, "value")?;

        arguments.insert(name.clone(), AclArgument { name, value });
    }
    Ok(arguments)
}

fn as_block<'a>(path: &str, item: &'a Value) -> Result<&'a Map<String, Value>> {
    item.as_object().ok_or_else(|| ProviderError::TypeMismatch {
        key: path.to_string(),
        expected: "block",
    })
}

fn string_field(path: &str, fields: &Map<String, Value>, field: &str) -> Result<String> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ProviderError::TypeMismatch {
            key: format!("{}.{}", path, field),
            expected: "string",
        }),
    }
}
