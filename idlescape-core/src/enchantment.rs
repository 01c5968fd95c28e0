//! Enchantment records (`enchantments.json`) and the destructive-id annotation.

use std::borrow::Cow;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::collection::{IndexedCollection, Record, TypedRecord, read_typed, read_typed_lossy};
use crate::config::KeyPolicy;
use crate::error::Result;
use crate::types::RecordId;

/// Enchantment ids that destroy the target item when applied.
pub const DESTRUCTIVE_IDS: [RecordId; 2] = [RecordId(3), RecordId(7)];

/// A single enchantment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Enchantment id as stored inside the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Set for enchantments in [`DESTRUCTIVE_IDS`]; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive: Option<bool>,
    /// Every other source field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Source values of the typed fields.
    #[serde(skip)]
    source: Map<String, Value>,
}

impl Enchantment {
    /// Whether applying this enchantment destroys the target.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.destructive.unwrap_or(false)
    }
}

impl TypedRecord for Enchantment {
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

impl Record for Enchantment {
    fn from_raw(raw: Value) -> std::result::Result<Self, serde_json::Error> {
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
            "destructive" => self.destructive.map(|d| Cow::Owned(Value::Bool(d))),
            _ => None,
        }
    }
}

/// Enchantment table with destructive enchantments flagged at construction.
///
/// Dereferences to the underlying [`IndexedCollection`] for lookups.
#[derive(Debug, Clone, Default)]
pub struct EnchantmentCollection {
    inner: IndexedCollection<Enchantment>,
}

impl EnchantmentCollection {
    /// Build from a raw document, never failing. See [`IndexedCollection::from_value`].
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        Self::annotate(IndexedCollection::from_value(raw))
    }

    /// Build from a raw document, rejecting anything irregular.
    ///
    /// # Errors
    /// See [`IndexedCollection::from_value_strict`].
    pub fn from_value_strict(raw: Value) -> Result<Self> {
        IndexedCollection::from_value_strict(raw).map(Self::annotate)
    }

    /// Build under the given key policy.
    ///
    /// # Errors
    /// Only [`KeyPolicy::Strict`] can fail.
    pub fn build(raw: Value, policy: KeyPolicy) -> Result<Self> {
        IndexedCollection::build(raw, policy).map(Self::annotate)
    }

    /// Flag every record whose own `id` field is destructive.
    fn annotate(mut inner: IndexedCollection<Enchantment>) -> Self {
        for enchantment in inner.values_mut() {
            if enchantment.id.is_some_and(|id| DESTRUCTIVE_IDS.contains(&id)) {
                enchantment.destructive = Some(true);
                enchantment.source.remove("destructive");
                enchantment.extra.remove("destructive");
                debug!(id = ?enchantment.id, name = ?enchantment.name, "Flagged destructive enchantment");
            }
        }
        Self { inner }
    }

    /// Iterate the destructive enchantments in source order.
    pub fn destructive(&self) -> impl Iterator<Item = &Enchantment> {
        self.inner.values().filter(|e| e.is_destructive())
    }
}

impl Deref for EnchantmentCollection {
    type Target = IndexedCollection<Enchantment>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<IndexedCollection<Enchantment>> for EnchantmentCollection {
    fn from(inner: IndexedCollection<Enchantment>) -> Self {
        Self::annotate(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Value {
        json!({
            "1": { "id": 1, "name": "Scholar" },
            "3": { "id": 3, "name": "Wealth" },
            "5": { "id": 5, "name": "Gathering" },
            "7": { "id": 7, "name": "Fishing" },
        })
    }

    #[test]
    fn ids_three_and_seven_are_destructive() {
        let enchantments = EnchantmentCollection::from_value(raw());
        for (id, enchantment) in enchantments.iter() {
            let expected = id == RecordId(3) || id == RecordId(7);
            assert_eq!(enchantment.is_destructive(), expected, "id {id}");
        }
        assert_eq!(enchantments.destructive().count(), 2);
    }

    #[test]
    fn non_destructive_records_gain_no_field() {
        let enchantments = EnchantmentCollection::from_value(raw());
        assert!(enchantments.get(&1).expect("enchantment").property("destructive").is_none());
        assert_eq!(
            enchantments.get(&3).expect("enchantment").property("destructive").as_deref(),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn flag_follows_the_record_id_not_the_key() {
        let enchantments = EnchantmentCollection::from_value(json!({
            "3": { "id": 30, "name": "Mislabelled" },
            "30": { "id": 3, "name": "Relocated" },
        }));
        assert!(!enchantments.get(&3).expect("enchantment").is_destructive());
        assert!(enchantments.get(&30).expect("enchantment").is_destructive());
    }

    #[test]
    fn non_object_document_is_empty() {
        assert!(EnchantmentCollection::from_value(json!("nope")).is_empty());
    }

    #[test]
    fn lookups_go_through_deref() {
        let enchantments = EnchantmentCollection::from_value(raw());
        assert_eq!(enchantments.get_by_name("wealth").and_then(|e| e.id), Some(RecordId(3)));
    }

    #[test]
    fn annotation_overrides_source_flag() {
        let enchantments = EnchantmentCollection::from_value(json!({
            "3": { "id": 3, "name": "Wealth", "destructive": "no" },
            "4": { "id": 4, "name": "Haste", "destructive": false },
        }));

        let wealth = enchantments.get(&3).expect("enchantment");
        assert!(wealth.is_destructive());
        assert_eq!(wealth.property("destructive").as_deref(), Some(&Value::Bool(true)));

        let haste = enchantments.get(&4).expect("enchantment");
        assert!(!haste.is_destructive());
        assert_eq!(haste.property("destructive").as_deref(), Some(&Value::Bool(false)));
    }

    #[test]
    fn badly_typed_id_keeps_the_record() {
        let enchantments = EnchantmentCollection::from_value(json!({
            "9": { "id": [9], "name": "Odd" },
        }));
        let odd = enchantments.get(&9).expect("enchantment");
        assert_eq!(odd.name.as_deref(), Some("Odd"));
        assert!(!odd.is_destructive());
        assert_eq!(odd.property("id").as_deref(), Some(&json!([9])));
    }
}
