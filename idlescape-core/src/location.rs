//! Location records (`locations.json`).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::collection::{IndexedCollection, Record, TypedRecord, read_typed, read_typed_lossy};
use crate::types::RecordId;

/// Collection of every location in `locations.json`.
pub type LocationCollection = IndexedCollection<Location>;

/// A combat zone, gathering spot or champion encounter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location id as stored inside the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Every other source field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Source values of the typed fields.
    #[serde(skip)]
    source: Map<String, Value>,
}

impl TypedRecord for Location {
    fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn extra_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.extra
    }

    fn source_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.source
    }
}

impl Record for Location {
    fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        read_typed(raw)
    }

    fn from_raw_lossy(raw: Value) -> Self {
        read_typed_lossy(raw)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn property(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.source.get(key).or_else(|| self.extra.get(key)) {
            return Some(Cow::Borrowed(value));
        }
        match key {
            "id" => self.id.map(|id| Cow::Owned(json!(id))),
            "name" => self.name.as_ref().map(|name| Cow::Owned(json!(name))),
            _ => None,
        }
    }
}
