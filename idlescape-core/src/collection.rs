//! Indexed Collection — id-keyed lookup table built from a raw JSON document.
//!
//! Every reference document (`items.json`, `enchantments.json`,
//! `locations.json`) is a JSON object mapping string-encoded integer ids to
//! record objects. [`IndexedCollection`] parses those keys, converts each
//! value into a typed [`Record`] and keeps them in source order.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::KeyPolicy;
use crate::error::{DataError, Result};
use crate::types::{AsRecordId, RecordId, json_type_name, parse_id_prefix, parse_id_strict, strict_equals};

/// A record type that can live in an [`IndexedCollection`].
pub trait Record: Sized {
    /// Build the record from one raw JSON value of the source document.
    ///
    /// # Errors
    /// Returns the deserializer error if the value does not fit the record's schema.
    fn from_raw(raw: Value) -> std::result::Result<Self, serde_json::Error>;

    /// Build the record from one raw JSON value, keeping whatever fits.
    ///
    /// Never fails: fields that do not fit the schema are kept untyped.
    fn from_raw_lossy(raw: Value) -> Self;

    /// The record's `name` field, if it has one.
    fn name(&self) -> Option<&str>;

    /// Any named property, typed fields and extra fields alike, as JSON.
    fn property(&self, key: &str) -> Option<Cow<'_, Value>>;
}

/// Untyped records: the raw JSON value is stored as-is.
impl Record for Value {
    fn from_raw(raw: Value) -> std::result::Result<Self, serde_json::Error> {
        Ok(raw)
    }

    fn from_raw_lossy(raw: Value) -> Self {
        raw
    }

    fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    fn property(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

/// A record with typed fields over a verbatim `extra` map.
///
/// Alongside the typed fields, the record keeps the source value each of them
/// was read from, so [`Record::property`] reports what the document wrote.
pub trait TypedRecord: DeserializeOwned + Default {
    /// Fields outside the typed schema, or that did not fit it.
    fn extra(&self) -> &Map<String, Value>;

    /// Mutable access to [`TypedRecord::extra`].
    fn extra_mut(&mut self) -> &mut Map<String, Value>;

    /// Slot for the source values of the typed fields.
    fn source_mut(&mut self) -> &mut Map<String, Value>;
}

/// Read a typed record, failing on the first field that does not fit.
pub(crate) fn read_typed<R: TypedRecord>(raw: Value) -> std::result::Result<R, serde_json::Error> {
    let mut record = R::deserialize(&raw)?;
    keep_source(&mut record, raw);
    Ok(record)
}

/// Read a typed record, moving fields that do not fit into `extra`.
///
/// A value that is not an object becomes an empty record.
pub(crate) fn read_typed_lossy<R: TypedRecord>(raw: Value) -> R {
    if let Ok(mut record) = R::deserialize(&raw) {
        keep_source(&mut record, raw);
        return record;
    }

    let map = match raw {
        Value::Object(map) => map,
        other => {
            warn!(found = json_type_name(&other), "Record is not an object, keeping it empty");
            return R::default();
        }
    };

    // Fields are independent, so each one is checked on its own.
    let (fits, misfits): (Map<String, Value>, Map<String, Value>) = map.into_iter().partition(|(key, value)| {
        let single = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
        R::deserialize(&single).is_ok()
    });

    let fits = Value::Object(fits);
    let mut record = R::deserialize(&fits).unwrap_or_default();
    keep_source(&mut record, fits);
    for (key, value) in misfits {
        warn!(field = %key, found = json_type_name(&value), "Field does not match its schema, keeping it untyped");
        record.extra_mut().insert(key, value);
    }
    record
}

fn keep_source<R: TypedRecord>(record: &mut R, raw: Value) {
    let Value::Object(map) = raw else {
        return;
    };
    let source = map
        .into_iter()
        .filter(|(key, _)| !record.extra().contains_key(key))
        .collect();
    *record.source_mut() = source;
}

/// Mapping from [`RecordId`] to record, in source key order.
///
/// Constructed once from a raw document and read-only afterwards.
#[derive(Debug, Clone)]
pub struct IndexedCollection<R> {
    records: IndexMap<RecordId, R>,
}

impl<R> Default for IndexedCollection<R> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }
}

impl<R: Record> IndexedCollection<R> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a raw document, never failing.
    ///
    /// - A non-object document yields an empty collection.
    /// - Keys are parsed with [`parse_id_prefix`]; keys with no integer
    ///   prefix are skipped.
    /// - Values are converted with [`Record::from_raw_lossy`], so a record
    ///   with a badly typed field is still indexed.
    /// - If two keys parse to the same id, the later value wins.
    ///
    /// Every skip is logged at `warn`.
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let map = match raw {
            Value::Object(map) => map,
            other => {
                debug!(found = json_type_name(&other), "Document is not an object, building empty collection");
                return Self::new();
            }
        };

        let mut records = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let Some(id) = parse_id_prefix(&key) else {
                warn!(key = %key, "Skipping record with non-numeric key");
                continue;
            };

            if records.insert(id, R::from_raw_lossy(value)).is_some() {
                warn!(key = %key, id = %id, "Duplicate record id, keeping the later record");
            }
        }

        Self { records }
    }

    /// Build a collection from a raw document, rejecting anything irregular.
    ///
    /// # Errors
    /// - [`DataError::NotAnObject`] if the document is not a JSON object.
    /// - [`DataError::InvalidKey`] if a key is not a canonical integer.
    /// - [`DataError::InvalidRecord`] if a value does not convert into `R`.
    pub fn from_value_strict(raw: Value) -> Result<Self> {
        let map = match raw {
            Value::Object(map) => map,
            other => {
                return Err(DataError::NotAnObject {
                    found: json_type_name(&other),
                });
            }
        };

        let mut records = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            let id = parse_id_strict(&key).ok_or_else(|| DataError::InvalidKey(key.clone()))?;
            let record = R::from_raw(value).map_err(|e| DataError::InvalidRecord {
                id: key,
                reason: e.to_string(),
            })?;
            records.insert(id, record);
        }

        Ok(Self { records })
    }

    /// Build a collection under the given key policy.
    ///
    /// # Errors
    /// Only [`KeyPolicy::Strict`] can fail; see [`Self::from_value_strict`].
    pub fn build(raw: Value, policy: KeyPolicy) -> Result<Self> {
        match policy {
            KeyPolicy::Lenient => Ok(Self::from_value(raw)),
            KeyPolicy::Strict => Self::from_value_strict(raw),
        }
    }

    /// Look a record up by id.
    ///
    /// Accepts a [`RecordId`], any primitive integer, a numeric string or a
    /// JSON value; the argument is coerced to an id first.
    pub fn get<K: AsRecordId + ?Sized>(&self, id: &K) -> Option<&R> {
        self.records.get(&id.as_record_id()?)
    }

    /// First record whose `name` matches case-insensitively.
    ///
    /// With duplicate names the first record in source order wins.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&R> {
        let needle = name.to_lowercase();
        self.records
            .values()
            .find(|record| record.name().is_some_and(|n| n.to_lowercase() == needle))
    }

    /// Records whose listed properties strictly equal `value`.
    ///
    /// A record is pushed once per matching property, so a record that
    /// matches on two of the listed properties appears twice.
    #[must_use]
    pub fn search_by_property_value(&self, value: &Value, properties: &[&str]) -> Vec<&R> {
        let mut found = Vec::new();
        for record in self.records.values() {
            for property in properties {
                if record
                    .property(property)
                    .is_some_and(|v| strict_equals(&v, value))
                {
                    found.push(record);
                }
            }
        }
        found
    }
}

impl<R> IndexedCollection<R> {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a record with this id exists.
    pub fn contains<K: AsRecordId + ?Sized>(&self, id: &K) -> bool {
        id.as_record_id()
            .is_some_and(|id| self.records.contains_key(&id))
    }

    /// Iterate `(id, record)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &R)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Iterate ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.records.keys().copied()
    }

    /// Iterate records in source order.
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut R> {
        self.records.values_mut()
    }
}

impl<R> FromIterator<(RecordId, R)> for IndexedCollection<R> {
    fn from_iter<I: IntoIterator<Item = (RecordId, R)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
