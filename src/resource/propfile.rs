//! Property file parser
//!
//! Parses simple `key = value` files. `#` starts a comment that runs to the
//! end of the line, keys and values are trimmed, and key case is preserved.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Parse property file text, invoking `handler` for each key-value pair in
/// file order.
pub fn parse_propfile(data: &str, handler: &mut dyn FnMut(&str, &str)) {
    for (lineno, line) in data.lines().enumerate() {
        let line = match line.find('#') {
            Some(at) => &line[..at],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    log::warn!("Line {}: value without key", lineno + 1);
                    continue;
                }
                handler(key, value.trim());
            }
            None => log::warn!("Line {}: key without value: {}", lineno + 1, line),
        }
    }
}

/// Parsed property file
#[derive(Debug, Clone, Default)]
pub struct PropertyFile {
    entries: HashMap<String, String>,
}

impl PropertyFile {
    /// Parse from a string. Later duplicates replace earlier ones.
    pub fn from_string(data: &str) -> Self {
        let mut entries = HashMap::new();
        parse_propfile(data, &mut |key, value| {
            entries.insert(key.to_string(), value.to_string());
        });
        Self { entries }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(Self::from_string(&data))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
