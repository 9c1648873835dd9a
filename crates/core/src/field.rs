//! Client-writable counter fields and the sparse map used for merge updates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::tracked_item::TrackedItem;

/// A recognized, client-writable field of a [`crate::CounterRecord`].
///
/// Identity fields (`id`, `userId`) are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CounterField {
    CurrentCount,
    CompletedMalas(TrackedItem),
    TotalRecitations(TrackedItem),
    ImageUrl(TrackedItem),
}

/// Value type a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Count,
    Image,
}

impl CounterField {
    /// Every recognized field, in record order.
    pub fn all() -> impl Iterator<Item = CounterField> {
        let tallies = TrackedItem::ALL
            .into_iter()
            .flat_map(|item| [Self::CompletedMalas(item), Self::TotalRecitations(item)]);
        let images = TrackedItem::ALL.into_iter().map(Self::ImageUrl);
        std::iter::once(Self::CurrentCount).chain(tallies).chain(images)
    }

    /// Wire name (camelCase JSON key).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CurrentCount => "currentCount",
            Self::CompletedMalas(item) => item.descriptor().completed_field,
            Self::TotalRecitations(item) => item.descriptor().recitations_field,
            Self::ImageUrl(item) => item.descriptor().image_field,
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::ImageUrl(_) => FieldKind::Image,
            _ => FieldKind::Count,
        }
    }

    #[must_use]
    pub const fn item(self) -> Option<TrackedItem> {
        match self {
            Self::CurrentCount => None,
            Self::CompletedMalas(item) | Self::TotalRecitations(item) | Self::ImageUrl(item) => {
                Some(item)
            },
        }
    }
}

impl fmt::Display for CounterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CounterField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .find(|field| field.name() == s)
            .ok_or_else(|| CoreError::UnrecognizedField(s.to_owned()))
    }
}

/// New value for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Count(u64),
    Image(String),
}

impl FieldValue {
    /// Type-check a JSON value against the field's kind.
    ///
    /// Image fields accept `null` as "clear back to the default icon".
    pub fn from_json(field: CounterField, value: &Value) -> Result<Self, CoreError> {
        match field.kind() {
            FieldKind::Count => value.as_u64().map(Self::Count).ok_or(CoreError::InvalidValue {
                field: field.name(),
                expected: "a non-negative integer",
            }),
            FieldKind::Image => match value {
                Value::String(s) => Ok(Self::Image(s.clone())),
                Value::Null => Ok(Self::Image(String::new())),
                _ => Err(CoreError::InvalidValue { field: field.name(), expected: "a string" }),
            },
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Count(n) => Value::from(*n),
            Self::Image(s) => Value::from(s.as_str()),
        }
    }
}

/// What to do with keys that are not recognized fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Fail validation (update path).
    Reject,
    /// Silently drop them (backup import path).
    Drop,
}

/// Mapping from field to new value, carrying only the fields an operation changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseFieldMap {
    fields: BTreeMap<CounterField, FieldValue>,
}

impl SparseFieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&mut self, field: CounterField, value: u64) -> &mut Self {
        debug_assert_eq!(field.kind(), FieldKind::Count);
        self.fields.insert(field, FieldValue::Count(value));
        self
    }

    pub fn set_image(&mut self, item: TrackedItem, payload: impl Into<String>) -> &mut Self {
        self.fields.insert(CounterField::ImageUrl(item), FieldValue::Image(payload.into()));
        self
    }

    #[must_use]
    pub fn with_count(mut self, field: CounterField, value: u64) -> Self {
        self.set_count(field, value);
        self
    }

    #[must_use]
    pub fn get(&self, field: CounterField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    #[must_use]
    pub fn count(&self, field: CounterField) -> Option<u64> {
        match self.fields.get(&field) {
            Some(FieldValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CounterField, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Names of the fields present, in record order (each item's completed
    /// and total fields side by side, images last).
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        CounterField::all()
            .filter(|field| self.fields.contains_key(field))
            .map(CounterField::name)
            .collect()
    }

    /// Build a map from a JSON object, validating every recognized key's value.
    pub fn from_json_object(
        object: &Map<String, Value>,
        unknown: UnknownKeys,
    ) -> Result<Self, CoreError> {
        let mut map = Self::new();
        for (key, value) in object {
            let field = match key.parse::<CounterField>() {
                Ok(field) => field,
                Err(err) => match unknown {
                    UnknownKeys::Reject => return Err(err),
                    UnknownKeys::Drop => continue,
                },
            };
            map.fields.insert(field, FieldValue::from_json(field, value)?);
        }
        Ok(map)
    }

    /// Build a map from any JSON value; non-objects are rejected.
    pub fn from_json(value: &Value, unknown: UnknownKeys) -> Result<Self, CoreError> {
        match value {
            Value::Object(object) => Self::from_json_object(object, unknown),
            _ => Err(CoreError::NotAnObject),
        }
    }
}

impl FromIterator<(CounterField, FieldValue)> for SparseFieldMap {
    fn from_iter<I: IntoIterator<Item = (CounterField, FieldValue)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl Serialize for SparseFieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.name(), &value.to_json())?;
        }
        map.end()
    }
}
