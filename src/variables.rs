use num_bigint::BigInt;
use std::collections::HashMap;
use tracing::debug;

/// Named values assigned during a session.
#[derive(Debug, Default, Clone)]
pub struct Variables {
    values: HashMap<String, BigInt>,
}

/// `[a-zA-Z]+`
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

impl Variables {
    pub fn new() -> Self {
        Self{values: HashMap::new()}
    }

    pub fn get(&self, name: &str) -> Option<&BigInt> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: BigInt) {
        let name = name.into();
        debug!(%name, %value, "assigning variable");
        self.values.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
