use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// The event payload received from and returned to the Lambda service.
///
/// Key order of the incoming JSON document is kept.
pub type Event = Map<String, Value>;

/// A string-keyed mapping the transformer can log and tag.
///
/// Implementations must serialize as a JSON object.
pub trait Record: Serialize {
    /// Number of keys in the record.
    fn len(&self) -> usize;

    /// Returns `true` if the record has no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets `key` to the string `value`, returning the previous value if the
    /// key was already present.
    fn set_attribute(&mut self, key: &str, value: &str) -> Option<Value>;
}

impl Record for Map<String, Value> {
    fn len(&self) -> usize {
        Map::len(self)
    }

    fn set_attribute(&mut self, key: &str, value: &str) -> Option<Value> {
        self.insert(key.to_owned(), Value::from(value))
    }
}

impl Record for BTreeMap<String, Value> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn set_attribute(&mut self, key: &str, value: &str) -> Option<Value> {
        self.insert(key.to_owned(), Value::from(value))
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn set_attribute(&mut self, key: &str, value: &str) -> Option<Value> {
        self.insert(key.to_owned(), Value::from(value))
    }
}
