//! Action inputs and the execute payload.
//!
//! An [`ActionInput`] is one set of named arguments for a database action.
//! Names are case-insensitive: every key is lowercased before it is written
//! or looked up, so `"Foo"` and `"foo"` are the same input. Insertion order
//! is kept, which matters because the payload encoding drops names and
//! keeps only the values in order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

// ---------------------------------------------------------------------------
// ActionInput
// ---------------------------------------------------------------------------

/// Ordered map of lowercased input names to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ActionInput {
    map: Map<String, Value>,
}

impl ActionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`ActionInput::new`] for chained construction.
    pub fn of() -> Self {
        Self::new()
    }

    /// Adds or replaces an input.
    pub fn put(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.map.insert(normalize(key), value.into());
        self
    }

    pub fn put_if_absent(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.map.entry(normalize(key)).or_insert_with(|| value.into());
        self
    }

    /// Overwrites an input only if it is already present.
    pub fn replace(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        if let Some(slot) = self.map.get_mut(&normalize(key)) {
            *slot = value.into();
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(&normalize(key))
    }

    /// The stored value, or `default` when the key is absent or holds `null`.
    pub fn get_or_default<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).filter(|v| !v.is_null()).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(&normalize(key))
    }

    /// Removes an input. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        // shift_remove keeps the order of the remaining inputs.
        self.map.shift_remove(&normalize(key)).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries matching `filter`, in insertion order.
    pub fn to_entries<F>(&self, filter: F) -> Vec<(String, Value)>
    where
        F: Fn(&str, &Value) -> bool,
    {
        self.iter()
            .filter(|(k, v)| filter(k, v))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Input values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.map.values()
    }

    /// Adds or replaces every entry of `obj`.
    pub fn put_from_object(&mut self, obj: &Map<String, Value>) -> &mut Self {
        for (k, v) in obj {
            self.put(k, v.clone());
        }
        self
    }

    pub fn put_from_object_if_absent(&mut self, obj: &Map<String, Value>) -> &mut Self {
        for (k, v) in obj {
            self.put_if_absent(k, v.clone());
        }
        self
    }

    pub fn replace_from_object(&mut self, obj: &Map<String, Value>) -> &mut Self {
        for (k, v) in obj {
            self.replace(k, v.clone());
        }
        self
    }

    pub fn from_object(obj: &Map<String, Value>) -> Self {
        let mut input = Self::new();
        input.put_from_object(obj);
        input
    }

    /// One input per object.
    pub fn from_objects<'a, I>(objs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        objs.into_iter().map(Self::from_object).collect()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for ActionInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (k, v) in iter {
            input.put(k.as_ref(), v);
        }
        input
    }
}

impl From<Map<String, Value>> for ActionInput {
    fn from(obj: Map<String, Value>) -> Self {
        obj.into_iter().collect()
    }
}

impl From<ActionInput> for Map<String, Value> {
    fn from(input: ActionInput) -> Self {
        input.map
    }
}

impl From<ActionInput> for Value {
    fn from(input: ActionInput) -> Self {
        input.into_value()
    }
}

// ---------------------------------------------------------------------------
// ActionBody
// ---------------------------------------------------------------------------

/// An action call against a database namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBody {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ActionInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionBody {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: ActionInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The execute payload: `{"dbid", "action", "arguments"}` with one inner
    /// list of values per input set.
    pub fn to_payload(&self) -> Value {
        let arguments: Vec<Value> = self
            .inputs
            .iter()
            .map(|input| Value::Array(input.values().cloned().collect()))
            .collect();

        let mut payload = Map::new();
        payload.insert("dbid".into(), Value::String(self.namespace.clone()));
        payload.insert("action".into(), Value::String(self.name.clone()));
        payload.insert("arguments".into(), Value::Array(arguments));
        Value::Object(payload)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
