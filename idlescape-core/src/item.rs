//! Item records and their derived augmentation views.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{trace, warn};

use crate::collection::{IndexedCollection, Record, TypedRecord, read_typed, read_typed_lossy};
use crate::resolve::{ItemResolver, LocationResolver};
use crate::stats::{AugmentStats, parse_stat_description, strip_colon};
use crate::types::{AsRecordId, RecordId};

/// Collection of every item in `items.json`.
pub type ItemCollection = IndexedCollection<Item>;

/// One entry of an item's `augmentationStats` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationStat {
    /// Human-readable stat description, e.g. `"Accuracy (Melee):"`.
    pub description: String,
    /// Bonus per augmentation level; `None` when the source has no number.
    #[serde(default)]
    pub value: Option<f64>,
}

/// A single item from `items.json`.
///
/// Fields the lookup layer works with are typed; everything else the source
/// carries is kept verbatim in [`Item::extra`]. A typed field whose source
/// value has the wrong shape is left unset and kept in `extra` instead when
/// the item is built leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item id as stored inside the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Item category (`"Weapon"`, `"Ore"`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Resource item id (string) → amount consumed per augmentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation_cost: Option<IndexMap<String, f64>>,
    /// Stat bonuses granted per augmentation level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub augmentation_stats: Option<Vec<AugmentationStat>>,
    /// Marks a champion scroll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_champ_scroll: Option<bool>,
    /// Location id of the encounter a champion scroll belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champ_encounter: Option<RecordId>,
    /// Every other source field.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Source values of the typed fields.
    #[serde(skip)]
    source: Map<String, Value>,
}

/// One resolved entry of an item's augmentation cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentCost {
    /// Resource item id, as written in the cost map.
    pub id: String,
    /// Amount of the resource consumed.
    pub cost: f64,
    /// Resource name; `None` when the id does not resolve.
    pub name: Option<String>,
}

impl Item {
    /// Build an item from a raw JSON object.
    ///
    /// # Errors
    /// Returns the deserializer error if a typed field has the wrong shape.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        read_typed(raw)
    }

    /// Whether this item is a champion scroll.
    #[must_use]
    pub fn is_champ_scroll(&self) -> bool {
        self.is_champ_scroll.unwrap_or(false)
    }

    /// Resolve the augmentation cost map into named entries.
    ///
    /// Returns `None` if the item has no `augmentationCost`. Resource ids that
    /// do not resolve keep `name: None`.
    pub fn augment_cost<I: ItemResolver + ?Sized>(&self, items: &I) -> Option<IndexMap<String, AugmentCost>> {
        let cost = self.augmentation_cost.as_ref()?;

        let resolved = cost
            .iter()
            .map(|(resource_id, amount)| {
                let name = resource_id
                    .as_record_id()
                    .and_then(|id| items.item_name(id))
                    .map(str::to_owned);
                let entry = AugmentCost {
                    id: resource_id.clone(),
                    cost: *amount,
                    name,
                };
                (resource_id.clone(), entry)
            })
            .collect();
        Some(resolved)
    }

    /// Group the augmentation stats by category.
    ///
    /// Returns `None` if the item has no `augmentationStats`.
    ///
    /// Champion scrolls with a `champEncounter` file every stat under the
    /// encounter's location name; if that location cannot be resolved the
    /// stats are skipped. Other items parse each description with
    /// [`parse_stat_description`] and skip descriptions that do not parse.
    pub fn augment_stats<L: LocationResolver + ?Sized>(&self, locations: &L) -> Option<AugmentStats> {
        let entries = self.augmentation_stats.as_ref()?;
        let is_scroll = self.is_champ_scroll();
        let mut view = AugmentStats {
            is_scroll,
            ..AugmentStats::default()
        };

        let encounter = if is_scroll { self.champ_encounter } else { None };
        let location = encounter.map(|id| locations.location_name(id));
        if let (Some(id), Some(None)) = (encounter, location) {
            warn!(item = ?self.id, encounter = %id, "Champion scroll encounter did not resolve, skipping its stats");
        }

        for entry in entries {
            let Some(value) = entry.value else {
                warn!(item = ?self.id, description = %entry.description, "Skipping stat without a numeric value");
                continue;
            };
            match location {
                Some(Some(name)) => view.push(name, strip_colon(&entry.description), value),
                Some(None) => {}
                None => match parse_stat_description(&entry.description) {
                    Some(label) => view.push(label.category, label.stat, value),
                    None => trace!(description = %entry.description, "Skipping unrecognised stat description"),
                },
            }
        }

        Some(view)
    }
}

impl TypedRecord for Item {
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

impl Record for Item {
    fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        Self::from_value(raw)
    }

    fn from_raw_lossy(raw: Value) -> Self {
        read_typed_lossy(raw)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Source values come back as written; typed fields set in code are
    /// serialized on the fly.
    fn property(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.source.get(key).or_else(|| self.extra.get(key)) {
            return Some(Cow::Borrowed(value));
        }
        let typed = match key {
            "id" => self.id.map(|id| json!(id)),
            "name" => self.name.as_ref().map(|name| json!(name)),
            "category" => self.category.as_ref().map(|category| json!(category)),
            "augmentationCost" => self.augmentation_cost.as_ref().map(|cost| json!(cost)),
            "augmentationStats" => self.augmentation_stats.as_ref().map(|stats| json!(stats)),
            "isChampScroll" => self.is_champ_scroll.map(Value::Bool),
            "champEncounter" => self.champ_encounter.map(|id| json!(id)),
            _ => None,
        };
        typed.map(Cow::Owned)
    }
}
