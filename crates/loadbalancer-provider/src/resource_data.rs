//! Per-invocation view of a resource instance

use crate::error::{ProviderError, Result};
use crate::schema::{Attribute, Block, ValueType};
use serde::Serialize;
use serde_json::{Map, Value};

/// Configuration, prior state and resulting state of one resource instance
///
/// Handlers read configured values through the typed getters, write API
/// responses back with [`ResourceData::set`], and clear the ID when the
/// remote object no longer exists.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Block,
    id: String,
    prior: Map<String, Value>,
    planned: Map<String, Value>,
    current: Map<String, Value>,
}

impl ResourceData {
    /// Data for a create or data source read, built from configuration only
    pub fn from_config(schema: Block, config: Map<String, Value>) -> Result<Self> {
        validate_config(&schema, &config, "")?;
        let planned = apply_defaults(&schema, config);

        Ok(Self {
            schema,
            id: String::new(),
            prior: Map::new(),
            current: planned.clone(),
            planned,
        })
    }

    /// Data for a read or delete of an existing instance
    pub fn from_state(schema: Block, id: impl Into<String>, state: Map<String, Value>) -> Self {
        Self {
            schema,
            id: id.into(),
            prior: state.clone(),
            planned: state.clone(),
            current: state,
        }
    }

    /// Data for an update: prior state plus the new configuration
    ///
    /// Computed values not present in the configuration keep their prior
    /// value, so they do not register as changes.
    pub fn for_update(
        schema: Block,
        id: impl Into<String>,
        prior: Map<String, Value>,
        config: Map<String, Value>,
    ) -> Result<Self> {
        validate_config(&schema, &config, "")?;
        let mut planned = apply_defaults(&schema, config);

        for (name, attr) in schema.iter() {
            if attr.computed && is_unset(planned.get(name)) {
                if let Some(value) = prior.get(name) {
                    planned.insert(name.clone(), value.clone());
                }
            }
        }

        Ok(Self {
            schema,
            id: id.into(),
            prior,
            current: planned.clone(),
            planned,
        })
    }

    /// Data for an import: only the ID is known
    pub fn for_import(schema: Block, id: impl Into<String>) -> Self {
        Self::from_state(schema, id, Map::new())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl ToString) {
        self.id = id.to_string();
    }

    /// Mark the instance as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn parse_id(&self) -> Result<i64> {
        self.id
            .parse()
            .map_err(|_| ProviderError::InvalidId(self.id.clone()))
    }

    pub fn schema(&self) -> &Block {
        &self.schema
    }

    fn attribute(&self, key: &str) -> Result<&Attribute> {
        self.schema
            .get(key)
            .ok_or_else(|| ProviderError::UnknownAttribute(key.to_string()))
    }

    /// Current value of an attribute, or its zero value when unset
    pub fn get(&self, key: &str) -> Result<Value> {
        let attr = self.attribute(key)?;
        Ok(match self.current.get(key) {
            None | Some(Value::Null) => attr.zero_value(),
            Some(value) => value.clone(),
        })
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)?
            .as_i64()
            .ok_or_else(|| type_mismatch(key, ValueType::Int))
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            Value::String(value) => Ok(value),
            _ => Err(type_mismatch(key, ValueType::String)),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| type_mismatch(key, ValueType::Bool))
    }

    pub fn get_list(&self, key: &str) -> Result<Vec<Value>> {
        match self.get(key)? {
            Value::Array(items) => Ok(items),
            _ => Err(type_mismatch(key, ValueType::List)),
        }
    }

    /// Integer value, or `None` when unset or zero
    pub fn get_int_ok(&self, key: &str) -> Result<Option<i64>> {
        Ok(Some(self.get_int(key)?).filter(|value| *value != 0))
    }

    /// String value, or `None` when unset or empty
    pub fn get_string_ok(&self, key: &str) -> Result<Option<String>> {
        Ok(Some(self.get_string(key)?).filter(|value| !value.is_empty()))
    }

    /// Bool value, or `None` when unset or false
    pub fn get_bool_ok(&self, key: &str) -> Result<Option<bool>> {
        Ok(Some(self.get_bool(key)?).filter(|value| *value))
    }

    /// Whether the configured value differs from the prior state
    pub fn has_change(&self, key: &str) -> Result<bool> {
        let attr = self.attribute(key)?;
        Ok(!attr.values_equal(self.prior.get(key), self.planned.get(key)))
    }

    /// Whether any of the given attributes changed
    pub fn has_changes(&self, keys: &[&str]) -> Result<bool> {
        for key in keys {
            if self.has_change(key)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn changed_string(&self, key: &str) -> Result<Option<String>> {
        if self.has_change(key)? {
            self.get_string(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn changed_int(&self, key: &str) -> Result<Option<i64>> {
        if self.has_change(key)? {
            self.get_int(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn changed_bool(&self, key: &str) -> Result<Option<bool>> {
        if self.has_change(key)? {
            self.get_bool(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Store a value in the resulting state
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let attr = self.attribute(key)?;
        let value = serde_json::to_value(value)?;
        if !value.is_null() && !attr.value_type.matches(&value) {
            return Err(type_mismatch(key, attr.value_type));
        }

        self.current.insert(key.to_string(), value);
        Ok(())
    }

    pub fn set_keys<'a>(
        &mut self,
        values: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<()> {
        for (key, value) in values {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Resulting state with every schema attribute present
    pub fn state(&self) -> Map<String, Value> {
        self.schema
            .iter()
            .map(|(name, attr)| {
                let value = match self.current.get(name) {
                    None | Some(Value::Null) => attr.zero_value(),
                    Some(value) => value.clone(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

fn type_mismatch(key: &str, value_type: ValueType) -> ProviderError {
    ProviderError::TypeMismatch {
        key: key.to_string(),
        expected: value_type.type_name(),
    }
}

fn is_unset(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn apply_defaults(schema: &Block, mut config: Map<String, Value>) -> Map<String, Value> {
    for (name, attr) in schema.iter() {
        if let Some(default) = &attr.default {
            if is_unset(config.get(name)) {
                config.insert(name.clone(), default.clone());
            }
        }
    }
    config
}

fn validate_config(block: &Block, config: &Map<String, Value>, prefix: &str) -> Result<()> {
    let path = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        }
    };

    for key in config.keys() {
        match block.get(key) {
            None => return Err(ProviderError::UnknownAttribute(path(key))),
            Some(attr) if attr.computed && !attr.optional => {
                return Err(ProviderError::InvalidArgument(format!(
                    "{} is computed and cannot be configured",
                    path(key)
                )));
            }
            Some(_) => {}
        }
    }

    for (name, attr) in block.iter() {
        let value = config.get(name).filter(|value| !value.is_null());

        let Some(value) = value else {
            if attr.required {
                return Err(ProviderError::InvalidArgument(format!(
                    "{} is required",
                    path(name)
                )));
            }
            continue;
        };

        if !attr.value_type.matches(value) {
            return Err(type_mismatch(&path(name), attr.value_type));
        }

        if let Value::Array(items) = value {
            if let Some(min_items) = attr.min_items {
                if items.len() < min_items {
                    return Err(ProviderError::InvalidArgument(format!(
                        "{} requires at least {} item(s)",
                        path(name),
                        min_items
                    )));
                }
            }
            if let Some(elem) = &attr.elem {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}.{}", path(name), index);
                    match item {
                        Value::Object(fields) => validate_config(elem, fields, &item_path)?,
                        _ => {
                            return Err(ProviderError::TypeMismatch {
                                key: item_path,
                                expected: "block",
                            });
                        }
                    }
                }
            }
        }
    }

    for (name, attr) in block.iter() {
        if attr.exactly_one_of.is_empty() || attr.exactly_one_of.first() != Some(name) {
            continue;
        }
        let set = attr
            .exactly_one_of
            .iter()
            .filter(|key| !is_unset(config.get(key.as_str())))
            .count();
        if set != 1 {
            return Err(ProviderError::InvalidArgument(format!(
                "exactly one of `{}` must be specified",
                attr.exactly_one_of.join(", ")
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Block {
        Block::new()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("cluster_id", Attribute::required_int().force_new())
            .with_attribute("close", Attribute::optional_bool().with_default(false))
            .with_attribute("custom_ciphers", Attribute::optional_string())
            .with_attribute("hsts_maxage", Attribute::optional_computed(ValueType::Int))
            .with_attribute("deployed", Attribute::computed_bool())
    }

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_config_applies_defaults() {
        let data =
            ResourceData::from_config(schema(), map(json!({"name": "web", "cluster_id": 1})))
                .unwrap();

        assert_eq!(data.get_bool("close").unwrap(), false);
        assert_eq!(data.get_string("name").unwrap(), "web");
        assert_eq!(data.get_int("cluster_id").unwrap(), 1);
        assert_eq!(data.get_string_ok("custom_ciphers").unwrap(), None);
        assert_eq!(data.id(), "");
    }

    #[test]
    fn test_missing_required_rejected() {
        let err = ResourceData::from_config(schema(), map(json!({"name": "web"}))).unwrap_err();
        assert_eq!(err.to_string(), "cluster_id is required");
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let err = ResourceData::from_config(
            schema(),
            map(json!({"name": "web", "cluster_id": 1, "colour": "red"})),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownAttribute(key) if key == "colour"));
    }

    #[test]
    fn test_computed_only_rejected() {
        let err = ResourceData::from_config(
            schema(),
            map(json!({"name": "web", "cluster_id": 1, "deployed": true})),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidArgument(_)));
    }

    #[test]
    fn test_type_mismatch_names_key() {
        let err =
            ResourceData::from_config(schema(), map(json!({"name": 5, "cluster_id": 1})))
                .unwrap_err();
        assert_eq!(err.to_string(), "Attribute 'name' is not a valid string");
    }

    #[test]
    fn test_update_detects_only_changed_fields() {
        let prior = map(json!({
            "name": "web",
            "cluster_id": 1,
            "close": false,
            "custom_ciphers": "",
            "hsts_maxage": 300,
            "deployed": true
        }));
        let config = map(json!({"name": "web-2", "cluster_id": 1}));

        let data = ResourceData::for_update(schema(), "4", prior, config).unwrap();

        assert!(data.has_change("name").unwrap());
        assert!(!data.has_change("cluster_id").unwrap());
        assert!(!data.has_change("close").unwrap());
        assert!(!data.has_change("custom_ciphers").unwrap());
        assert!(!data.has_change("hsts_maxage").unwrap());
        assert_eq!(data.get_int("hsts_maxage").unwrap(), 300);
        assert_eq!(data.changed_string("name").unwrap(), Some("web-2".to_string()));
        assert_eq!(data.changed_bool("close").unwrap(), None);
    }

    #[test]
    fn test_update_clearing_string_is_a_change() {
        let prior = map(json!({"name": "web", "cluster_id": 1, "custom_ciphers": "ECDHE"}));
        let config = map(json!({"name": "web", "cluster_id": 1}));

        let data = ResourceData::for_update(schema(), "4", prior, config).unwrap();

        assert_eq!(data.changed_string("custom_ciphers").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_parse_id() {
        let mut data = ResourceData::for_import(schema(), "42");
        assert_eq!(data.parse_id().unwrap(), 42);

        data.set_id("abc");
        assert!(matches!(data.parse_id(), Err(ProviderError::InvalidId(id)) if id == "abc"));

        data.clear_id();
        assert_eq!(data.id(), "");
    }

    #[test]
    fn test_set_and_state() {
        let mut data = ResourceData::for_import(schema(), "1");
        data.set("name", "imported").unwrap();
        data.set("deployed", true).unwrap();

        let state = data.state();
        assert_eq!(state["name"], json!("imported"));
        assert_eq!(state["deployed"], json!(true));
        assert_eq!(state["cluster_id"], json!(0));
        assert_eq!(state.len(), 6);
    }

    #[test]
    fn test_set_rejects_wrong_type_and_unknown_key() {
        let mut data = ResourceData::for_import(schema(), "1");
        assert!(data.set("name", 5).is_err());
        assert!(data.set("colour", "red").is_err());
    }

    #[test]
    fn test_exactly_one_of() {
        let schema = Block::new()
            .with_attribute(
                "listener_id",
                Attribute::optional_int().exactly_one_of(&["listener_id", "target_group_id"]),
            )
            .with_attribute(
                "target_group_id",
                Attribute::optional_int().exactly_one_of(&["listener_id", "target_group_id"]),
            );

        assert!(ResourceData::from_config(schema.clone(), map(json!({"listener_id": 1}))).is_ok());
        assert!(ResourceData::from_config(schema.clone(), map(json!({}))).is_err());
        assert!(
            ResourceData::from_config(schema, map(json!({"listener_id": 1, "target_group_id": 2})))
                .is_err()
        );
    }

    #[test]
    fn test_min_items_and_nested_blocks() {
        let argument = Block::new()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("value", Attribute::required_string());
        let schema = Block::new().with_attribute(
            "argument",
            Attribute::required(ValueType::Set)
                .min_items(1)
                .with_elem(argument),
        );

        assert!(ResourceData::from_config(schema.clone(), map(json!({"argument": []}))).is_err());

        let err = ResourceData::from_config(
            schema.clone(),
            map(json!({"argument": [{"name": "host"}]})),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "argument.0.value is required");

        assert!(
            ResourceData::from_config(
                schema,
                map(json!({"argument": [{"name": "host", "value": "example.com"}]}))
            )
            .is_ok()
        );
    }
}
