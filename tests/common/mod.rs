#![allow(dead_code)]

use std::fmt;

use evaluators::Evaluable;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// A named value that can be looked up by name or by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub value: i64,
}

impl Evaluable<str> for Entry {
    fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

impl Evaluable<i64> for Entry {
    fn matches(&self, value: &i64) -> bool {
        self.value == *value
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

pub fn entry(name: &str, value: i64) -> Entry {
    Entry {
        name: name.to_string(),
        value,
    }
}

pub fn names<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Vec<String> {
    entries.into_iter().map(|e| e.name.clone()).collect()
}

// RUST_LOG=evaluators=trace shows growth and trimming while tests run.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
