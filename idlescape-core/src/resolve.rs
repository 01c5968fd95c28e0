//! Name resolution for cross-references between collections.
//!
//! Items refer to other items (augmentation costs) and to locations (champion
//! scrolls) by numeric id only. The derived views take a resolver instead of
//! reaching for a shared store, so they can be driven by a bare collection in
//! tests or by a partially loaded [`DataStore`](crate::DataStore).

use crate::collection::{IndexedCollection, Record};
use crate::item::Item;
use crate::location::Location;
use crate::types::RecordId;

/// Resolves item ids to item names.
pub trait ItemResolver {
    /// Name of the item with this id, if it is known.
    fn item_name(&self, id: RecordId) -> Option<&str>;
}

/// Resolves location ids to location names.
pub trait LocationResolver {
    /// Name of the location with this id, if it is known.
    fn location_name(&self, id: RecordId) -> Option<&str>;
}

impl ItemResolver for IndexedCollection<Item> {
    fn item_name(&self, id: RecordId) -> Option<&str> {
        self.get(&id).and_then(Record::name)
    }
}

impl LocationResolver for IndexedCollection<Location> {
    fn location_name(&self, id: RecordId) -> Option<&str> {
        self.get(&id).and_then(Record::name)
    }
}

impl<T: ItemResolver> ItemResolver for Option<T> {
    fn item_name(&self, id: RecordId) -> Option<&str> {
        self.as_ref()?.item_name(id)
    }
}

impl<T: LocationResolver> LocationResolver for Option<T> {
    fn location_name(&self, id: RecordId) -> Option<&str> {
        self.as_ref()?.location_name(id)
    }
}
