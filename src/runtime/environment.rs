use crate::runtime::value::Value;
use std::collections::HashMap;
use std::collections::hash_map;

/// Flat binding frame for one evaluation: the program top level, one method
/// invocation, or the field storage of a single instance.
#[derive(Clone, Debug, Default)]
pub struct Closure {
    bindings: HashMap<String, Value>,
}

impl Closure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.bindings.iter()
    }
}

impl FromIterator<(String, Value)> for Closure {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}
