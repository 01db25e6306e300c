//! Workflow command formatting: `::name key=value,key=value::message`.

use std::collections::BTreeMap;
use std::fmt;

/// Escape a command message.
pub fn escape_data(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '%' => out.push_str("%25"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            c => out.push(c),
        }
    }
    out
}

/// Escape a command property value. Stricter than [`escape_data`] since `:`
/// and `,` delimit properties.
pub fn escape_property(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            ':' => out.push_str("%3A"),
            ',' => out.push_str("%2C"),
            c => out.push(c),
        }
    }
    out
}

/// A single workflow command. Properties are kept sorted by key, so the
/// rendered line is deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    name: &'static str,
    properties: BTreeMap<&'static str, String>,
    message: String,
}

impl Command {
    pub fn new(name: &'static str, message: impl Into<String>) -> Self {
        Command {
            name,
            properties: BTreeMap::new(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn property(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { ',' };
            write!(f, "{sep}{key}={}", escape_property(value))?;
        }
        write!(f, "::{}", escape_data(&self.message))
    }
}
