//! Data Store — the three reference collections, each loaded independently.
//!
//! The store is an explicit context object: callers construct it, fill it
//! (usually through `idlescape-fetch`) and pass it by reference to whatever
//! needs item or location resolution. Each collection starts absent and
//! becomes populated on its own; nothing waits for all three.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::collection::IndexedCollection;
use crate::config::{KeyPolicy, SourceConfig};
use crate::enchantment::EnchantmentCollection;
use crate::error::Result;
use crate::item::ItemCollection;
use crate::location::LocationCollection;
use crate::resolve::{ItemResolver, LocationResolver};
use crate::types::RecordId;

/// Store shared between the loader tasks and readers.
pub type SharedStore = Arc<RwLock<DataStore>>;

/// One of the three reference documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// `enchantments.json`
    Enchantments,
    /// `items.json`
    Items,
    /// `locations.json`
    Locations,
}

impl Document {
    /// Every document, in load order.
    pub const ALL: [Document; 3] = [Document::Enchantments, Document::Items, Document::Locations];

    /// Short lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enchantments => "enchantments",
            Self::Items => "items",
            Self::Locations => "locations",
        }
    }

    /// Relative path of this document under the configured source.
    #[must_use]
    pub fn path(self, source: &SourceConfig) -> &str {
        match self {
            Self::Enchantments => &source.enchantments_path,
            Self::Items => &source.items_path,
            Self::Locations => &source.locations_path,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holder of the enchantment, item and location collections.
#[derive(Debug, Default)]
pub struct DataStore {
    enchantments: Option<EnchantmentCollection>,
    items: Option<ItemCollection>,
    locations: Option<LocationCollection>,
}

impl DataStore {
    /// Create a store with every collection absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully populated store from three raw documents, leniently.
    #[must_use]
    pub fn from_documents(enchantments: Value, items: Value, locations: Value) -> Self {
        Self {
            enchantments: Some(EnchantmentCollection::from_value(enchantments)),
            items: Some(IndexedCollection::from_value(items)),
            locations: Some(IndexedCollection::from_value(locations)),
        }
    }

    /// Wrap the store for sharing with loader tasks.
    #[must_use]
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Index a raw document and install it as the matching collection.
    ///
    /// Returns the number of records installed.
    ///
    /// # Errors
    /// Only fails under [`KeyPolicy::Strict`]; the store is left untouched.
    pub fn ingest(&mut self, document: Document, raw: Value, policy: KeyPolicy) -> Result<usize> {
        let count = match document {
            Document::Enchantments => {
                let collection = EnchantmentCollection::build(raw, policy)?;
                let count = collection.len();
                self.set_enchantments(collection);
                count
            }
            Document::Items => {
                let collection = ItemCollection::build(raw, policy)?;
                let count = collection.len();
                self.set_items(collection);
                count
            }
            Document::Locations => {
                let collection = LocationCollection::build(raw, policy)?;
                let count = collection.len();
                self.set_locations(collection);
                count
            }
        };
        Ok(count)
    }

    /// Move every collection present in `other` into this store.
    ///
    /// Collections absent from `other` are left as they are here.
    pub fn merge(&mut self, other: DataStore) {
        if let Some(enchantments) = other.enchantments {
            self.enchantments = Some(enchantments);
        }
        if let Some(items) = other.items {
            self.items = Some(items);
        }
        if let Some(locations) = other.locations {
            self.locations = Some(locations);
        }
    }

    /// Install the enchantment collection.
    pub fn set_enchantments(&mut self, enchantments: EnchantmentCollection) {
        self.enchantments = Some(enchantments);
    }

    /// Install the item collection.
    pub fn set_items(&mut self, items: ItemCollection) {
        self.items = Some(items);
    }

    /// Install the location collection.
    pub fn set_locations(&mut self, locations: LocationCollection) {
        self.locations = Some(locations);
    }

    /// Enchantments, if loaded.
    #[must_use]
    pub fn enchantments(&self) -> Option<&EnchantmentCollection> {
        self.enchantments.as_ref()
    }

    /// Items, if loaded.
    #[must_use]
    pub fn items(&self) -> Option<&ItemCollection> {
        self.items.as_ref()
    }

    /// Locations, if loaded.
    #[must_use]
    pub fn locations(&self) -> Option<&LocationCollection> {
        self.locations.as_ref()
    }

    /// Whether a given document has been loaded.
    #[must_use]
    pub fn is_loaded(&self, document: Document) -> bool {
        match document {
            Document::Enchantments => self.enchantments.is_some(),
            Document::Items => self.items.is_some(),
            Document::Locations => self.locations.is_some(),
        }
    }

    /// Whether all three collections are loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        Document::ALL.iter().all(|d| self.is_loaded(*d))
    }

    /// Documents not loaded yet.
    #[must_use]
    pub fn missing(&self) -> Vec<Document> {
        Document::ALL
            .into_iter()
            .filter(|d| !self.is_loaded(*d))
            .collect()
    }
}

impl ItemResolver for DataStore {
    fn item_name(&self, id: RecordId) -> Option<&str> {
        if self.items.is_none() {
            debug!(id = %id, "Item lookup before the item collection was loaded");
        }
        self.items.item_name(id)
    }
}

impl LocationResolver for DataStore {
    fn location_name(&self, id: RecordId) -> Option<&str> {
        if self.locations.is_none() {
            debug!(id = %id, "Location lookup before the location collection was loaded");
        }
        self.locations.location_name(id)
    }
}
