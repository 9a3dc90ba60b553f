use crate::error::DocumentError;
use std::fmt;
use std::str::FromStr;

/// Ordered `key:value` pairs from an SVG `style` attribute.
///
/// Keys keep the order they were first seen in. Setting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value such as `fill:none;stroke-width:1`.
    ///
    /// Every `;`-separated statement must hold a `:`, so an empty string, a
    /// trailing `;` or `;;` are errors. Whitespace around keys and values is
    /// dropped.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let mut style = StyleMap::new();
        for statement in raw.split(';') {
            let (key, value) = statement
                .split_once(':')
                .ok_or_else(|| DocumentError::InvalidStyle(statement.to_string()))?;
            style.set(key.trim(), value.trim());
        }
        Ok(style)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a property
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for StyleMap {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleMap::parse(s)
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", key, value)?;
        }
        Ok(())
    }
}
