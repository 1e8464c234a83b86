//! Line-oriented `key = value` configuration and header sources

use crate::error::{HsiError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Key/value pairs parsed from a header or range configuration source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    values: HashMap<String, String>,
}

impl ConfigMap {
    /// Parse a configuration source.
    ///
    /// Lines whose first non-whitespace character is `#` and lines without a
    /// key before `=` are skipped. Only the first `=` splits a line, and a
    /// later occurrence of a key overwrites an earlier one.
    pub fn parse(source: &str) -> Self {
        let mut values = HashMap::new();
        for line in source.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), value.trim().to_string());
        }
        Self { values }
    }

    /// Read and parse a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            HsiError::Config(format!(
                "configuration file '{}' could not be opened for reading: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::parse(&source))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Parse the value of `key`, reporting malformed values as configuration errors
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                HsiError::Config(format!("invalid value for '{}': '{}'", key, raw))
            }),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ConfigMap::default();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
