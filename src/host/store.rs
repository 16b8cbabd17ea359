use std::collections::HashMap;

/// Key/value state kept by the host between evaluations of a profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    values: HashMap<String, f64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: f64) {
        if key.is_empty() {
            return;
        }
        self.values.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
impl Store {
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
