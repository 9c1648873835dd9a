//! The counter record: every tally for every tracked item.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::{ANONYMOUS_RECORD_ID, TRACKED_ITEM_COUNT};
use crate::error::CoreError;
use crate::field::{CounterField, FieldValue, SparseFieldMap, UnknownKeys};
use crate::tracked_item::TrackedItem;

/// Per-item tallies.
///
/// `total_recitations == completed_malas * MALA_SIZE` under normal use; the
/// record itself does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemTally {
    pub completed_malas: u64,
    pub total_recitations: u64,
    /// Empty means "use the default icon".
    pub image_url: String,
}

/// All counters for all tracked items.
///
/// Serialized as a flat camelCase JSON object (`id`, `userId`, `currentCount`,
/// then every tally and image field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRecord {
    pub id: u32,
    pub user_id: Option<u32>,
    /// In-progress count toward the next mala of the primary item.
    pub current_count: u64,
    tallies: [ItemTally; TRACKED_ITEM_COUNT],
}

impl Default for CounterRecord {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl CounterRecord {
    /// The all-zero, all-default-icon anonymous record.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: ANONYMOUS_RECORD_ID,
            user_id: None,
            current_count: 0,
            tallies: Default::default(),
        }
    }

    #[must_use]
    pub fn tally(&self, item: TrackedItem) -> &ItemTally {
        &self.tallies[item.index()]
    }

    pub fn tally_mut(&mut self, item: TrackedItem) -> &mut ItemTally {
        &mut self.tallies[item.index()]
    }

    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: CounterField) -> FieldValue {
        match field {
            CounterField::CurrentCount => FieldValue::Count(self.current_count),
            CounterField::CompletedMalas(item) => FieldValue::Count(self.tally(item).completed_malas),
            CounterField::TotalRecitations(item) => {
                FieldValue::Count(self.tally(item).total_recitations)
            },
            CounterField::ImageUrl(item) => FieldValue::Image(self.tally(item).image_url.clone()),
        }
    }

    /// Overwrite one field. A value of the wrong kind for the field is ignored.
    pub fn set(&mut self, field: CounterField, value: FieldValue) {
        match (field, value) {
            (CounterField::CurrentCount, FieldValue::Count(n)) => self.current_count = n,
            (CounterField::CompletedMalas(item), FieldValue::Count(n)) => {
                self.tally_mut(item).completed_malas = n;
            },
            (CounterField::TotalRecitations(item), FieldValue::Count(n)) => {
                self.tally_mut(item).total_recitations = n;
            },
            (CounterField::ImageUrl(item), FieldValue::Image(url)) => {
                self.tally_mut(item).image_url = url;
            },
            (field, value) => {
                tracing::warn!(%field, ?value, "value kind does not match field, ignoring");
            },
        }
    }

    /// Overwrite every field present in `partial`; absent fields are untouched.
    pub fn merge(&mut self, partial: &SparseFieldMap) {
        for (field, value) in partial.iter() {
            self.set(field, value.clone());
        }
    }

    /// Every recognized field as a sparse map.
    #[must_use]
    pub fn to_field_map(&self) -> SparseFieldMap {
        CounterField::all().map(|field| (field, self.get(field))).collect()
    }

    /// Build a record from a JSON object. Missing fields keep their defaults,
    /// unknown keys are ignored.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, CoreError> {
        let mut record = Self::anonymous();
        if let Some(id) = object.get("id") {
            record.id = id
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or(CoreError::InvalidValue { field: "id", expected: "a record id" })?;
        }
        record.user_id = match object.get("userId") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or(CoreError::InvalidValue { field: "userId", expected: "a user id" })?,
            ),
        };
        record.merge(&SparseFieldMap::from_json_object(object, UnknownKeys::Drop)?);
        Ok(record)
    }
}

impl Serialize for CounterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + CounterField::all().count()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("userId", &self.user_id)?;
        for field in CounterField::all() {
            match self.get(field) {
                FieldValue::Count(n) => map.serialize_entry(field.name(), &n)?,
                FieldValue::Image(url) => map.serialize_entry(field.name(), &url)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CounterRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_json_object(&object).map_err(D::Error::custom)
    }
}
