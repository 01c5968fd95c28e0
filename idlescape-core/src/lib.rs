//! # Idlescape Data Core
//!
//! In-memory lookup layer for Idlescape reference data. Three JSON documents
//! (enchantments, items, locations) are each indexed into an
//! [`IndexedCollection`] keyed by [`RecordId`], then queried synchronously:
//!
//! - **Lookups** — `get` by id, `get_by_name` (case-insensitive),
//!   `search_by_property_value`
//! - **Derived views** — an item's resolved augmentation cost and its
//!   augmentation stats grouped by category
//! - **Cross-references** — resolved through [`ItemResolver`] and
//!   [`LocationResolver`], implemented by the collections themselves and by
//!   a partially loaded [`DataStore`]
//!
//! Read paths never fail: a miss is `None`. Irregular keys are skipped and
//! badly typed fields are kept untyped, each with a `tracing` event. Strict
//! constructors are available where a caller would rather see a [`DataError`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collection;
pub mod config;
pub mod enchantment;
pub mod error;
pub mod item;
pub mod location;
pub mod resolve;
pub mod stats;
pub mod store;
pub mod types;

pub use collection::{IndexedCollection, Record, TypedRecord};
pub use config::{DataConfig, KeyPolicy};
pub use enchantment::{DESTRUCTIVE_IDS, Enchantment, EnchantmentCollection};
pub use error::DataError;
pub use item::{AugmentCost, AugmentationStat, Item, ItemCollection};
pub use location::{Location, LocationCollection};
pub use resolve::{ItemResolver, LocationResolver};
pub use stats::{AugmentStats, StatValue};
pub use store::{DataStore, Document, SharedStore};
pub use types::{AsRecordId, RecordId};
