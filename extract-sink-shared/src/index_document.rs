//! The field set submitted to the document store.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// How field values are written into an [`IndexDocument`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Values are written directly; the store replaces the whole document.
    #[default]
    Direct,
    /// Values are wrapped in a "set" partial-update instruction.
    Atomic,
}

impl WriteMode {
    pub fn from_atomic(atomic: bool) -> Self {
        if atomic {
            WriteMode::Atomic
        } else {
            WriteMode::Direct
        }
    }

    /// Wrap a raw value according to this mode.
    pub fn wrap(self, value: impl Into<String>) -> FieldValue {
        match self {
            WriteMode::Direct => FieldValue::Plain(value.into()),
            WriteMode::Atomic => FieldValue::Set(value.into()),
        }
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A bare value.
    Plain(String),
    /// A partial-update instruction setting the field to this value.
    Set(String),
}

impl FieldValue {
    /// The raw value, regardless of envelope.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Plain(value) | FieldValue::Set(value) => value,
        }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, FieldValue::Set(_))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Plain(value) => serializer.serialize_str(value),
            FieldValue::Set(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("set", value)?;
                map.end()
            }
        }
    }
}

/// An assembled document: named fields in insertion order, each holding one
/// or more values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDocument {
    fields: Vec<(String, Vec<FieldValue>)>,
}

impl IndexDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every value of `name` with `value`.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => *values = vec![value],
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Append `value` to the values of `name`.
    pub fn add_field(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Values of `name`, or an empty slice.
    pub fn get(&self, name: &str) -> &[FieldValue] {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// The first value of `name`.
    pub fn first(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).first()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldValue])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for IndexDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, values) in &self.fields {
            match values.as_slice() {
                [single] => map.serialize_entry(name, single)?,
                many => map.serialize_entry(name, many)?,
            }
        }
        map.end()
    }
}
