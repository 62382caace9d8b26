use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    True,
    False,
    String(String),
    /// Lexical representation, emitted verbatim
    Number(String),
    Object(Object),
    Array(Vec<Value>),
}

impl Value {
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Ordered key/value pairs
///
/// `push` keeps duplicate keys as given; `insert_unique` resolves them last-wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Insert `value` under `key`, replacing an existing entry in place.
    pub fn insert_unique(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn find(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert_unique(key, value);
        }
        object
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::True => serializer.serialize_bool(true),
            Value::False => serializer.serialize_bool(false),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(lexical) => match json_number(lexical) {
                Some(raw) => raw.serialize(serializer),
                None => serializer.serialize_str(lexical),
            },
            Value::Object(object) => object.serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// `lexical` as a raw JSON token, if it is a valid JSON number
fn json_number(lexical: &str) -> Option<Box<RawValue>> {
    lexical.parse::<serde_json::Number>().ok()?;
    RawValue::from_string(lexical.to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_unique_replaces_in_place() {
        let mut object = Object::new();
        object.insert_unique("a", "1");
        object.insert_unique("b", "2");
        object.insert_unique("a", "3");

        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.find("a"), Some(&Value::from("3")));
    }

    #[test]
    fn push_keeps_duplicates() {
        let mut object = Object::new();
        object.push("a", true);
        object.push("a", false);
        assert_eq!(object.len(), 2);
        assert_eq!(object.find("a"), Some(&Value::True));
    }

    #[test]
    fn collected_objects_are_unique() {
        let object: Object = [("k", Value::Null), ("k", Value::True)].into_iter().collect();
        assert_eq!(object.len(), 1);
        assert_eq!(object.find("k"), Some(&Value::True));
    }

    #[test]
    fn only_json_numbers_are_raw() {
        assert!(json_number("5").is_some());
        assert!(json_number("-1.5e3").is_some());
        assert!(json_number("nan").is_none());
        assert!(json_number("").is_none());
        assert!(json_number("\"5\"").is_none());
    }
}
