//! Property-Based Tests for the indexed collections.
//!
//! Uses `proptest` to check lookup invariants over arbitrary documents.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use idlescape_core::{EnchantmentCollection, IndexedCollection, Record, RecordId};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_record() -> impl Strategy<Value = Value> {
    ("[A-Za-z][A-Za-z ']{0,16}", proptest::option::of(0..10i64), any::<bool>()).prop_map(|(name, tier, flag)| {
        let mut record = json!({ "name": name, "flag": flag });
        if let Some(tier) = tier {
            record["tier"] = json!(tier);
        }
        record
    })
}

/// A document with unique non-negative integer keys.
fn arb_document() -> impl Strategy<Value = (Vec<i64>, Value)> {
    proptest::collection::btree_map(0..100_000i64, arb_record(), 0..40).prop_map(|records| {
        let ids: Vec<_> = records.keys().copied().collect();
        let map: Map<String, Value> = records.into_iter().map(|(id, v)| (id.to_string(), v)).collect();
        (ids, Value::Object(map))
    })
}

// ---------------------------------------------------------------------------
// Property: every key round-trips to its original value
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn get_returns_every_original_value((ids, doc) in arb_document()) {
        let collection = IndexedCollection::<Value>::from_value(doc.clone());
        prop_assert_eq!(collection.len(), ids.len());

        for id in ids {
            let original = &doc[id.to_string()];
            prop_assert_eq!(collection.get(&id), Some(original));
            prop_assert_eq!(collection.get(id.to_string().as_str()), Some(original));
        }
    }
}

// ---------------------------------------------------------------------------
// Property: name lookup ignores case
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn get_by_name_ignores_case((_ids, doc) in arb_document()) {
        let collection = IndexedCollection::<Value>::from_value(doc);

        for record in collection.values() {
            let name = record.name().expect("generated records are named");
            let upper = collection.get_by_name(&name.to_uppercase()).expect("upper");
            let lower = collection.get_by_name(&name.to_lowercase()).expect("lower");
            prop_assert_eq!(upper, lower);
            prop_assert_eq!(upper.name().map(str::to_lowercase), Some(name.to_lowercase()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property: search returns exactly the matching records
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn search_returns_exactly_matching_records((_ids, doc) in arb_document(), tier in 0..10i64) {
        let collection = IndexedCollection::<Value>::from_value(doc);
        let found = collection.search_by_property_value(&json!(tier), &["tier"]);

        let expected: Vec<&Value> = collection
            .values()
            .filter(|r| r.get("tier") == Some(&json!(tier)))
            .collect();
        prop_assert_eq!(found, expected);
    }
}

// ---------------------------------------------------------------------------
// Property: destructive flag depends only on the record id
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn destructive_flag_only_on_three_and_seven(ids in proptest::collection::btree_set(0..20i64, 0..20)) {
        let map: Map<String, Value> = ids
            .iter()
            .map(|id| (id.to_string(), json!({ "id": id, "name": format!("Enchantment {id}") })))
            .collect();
        let enchantments = EnchantmentCollection::from_value(Value::Object(map));

        for (id, enchantment) in enchantments.iter() {
            prop_assert_eq!(enchantment.is_destructive(), id == RecordId(3) || id == RecordId(7));
        }
    }
}
