//! Idlescape data benchmark suite.
//!
//! Sized to the real extraction (~2,000 items, ~100 locations):
//!   index_items_2000 ............ building the item collection
//!   get_by_id_2000 .............. id lookup
//!   get_by_name_2000_last ....... worst-case name scan
//!   search_tier_2000 ............ property search
//!   augment_views_sword ......... cost + stats views on one item

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Map, Value, json};

use idlescape_core::{DataStore, ItemCollection};

const ITEM_COUNT: i64 = 2_000;

fn make_items() -> Value {
    let mut map = Map::new();
    for i in 0..ITEM_COUNT {
        let mut item = json!({
            "id": i,
            "name": format!("Item number {i}"),
            "tier": i % 10,
        });
        if i % 5 == 0 {
            let resource = ((i + 1) % ITEM_COUNT).to_string();
            item["augmentationCost"] = json!({ resource: 3, "2": 1 });
            item["augmentationStats"] = json!([
                { "description": "Strength:", "value": 2 },
                { "description": "Accuracy (Slashing):", "value": 1 },
                { "description": "Mining Skill:", "value": 1 },
            ]);
        }
        map.insert(i.to_string(), item);
    }
    Value::Object(map)
}

fn make_locations() -> Value {
    let map: Map<String, Value> = (0..100)
        .map(|i| (i.to_string(), json!({ "id": i, "name": format!("Location {i}") })))
        .collect();
    Value::Object(map)
}

/// Benchmark: Index the item document.
fn bench_index(c: &mut Criterion) {
    let raw = make_items();
    c.bench_function("index_items_2000", |b| {
        b.iter(|| {
            let items = ItemCollection::from_value(black_box(raw.clone()));
            black_box(items);
        });
    });
}

/// Benchmark: Id, name and property lookups.
fn bench_lookups(c: &mut Criterion) {
    let items = ItemCollection::from_value(make_items());
    let last_name = format!("ITEM NUMBER {}", ITEM_COUNT - 1);
    let tier = json!(5);

    c.bench_function("get_by_id_2000", |b| {
        b.iter(|| black_box(items.get(black_box("1234"))));
    });

    c.bench_function("get_by_name_2000_last", |b| {
        b.iter(|| black_box(items.get_by_name(black_box(&last_name))));
    });

    c.bench_function("search_tier_2000", |b| {
        b.iter(|| black_box(items.search_by_property_value(black_box(&tier), &["tier"])));
    });
}

/// Benchmark: Derived views resolved through the store.
fn bench_views(c: &mut Criterion) {
    let store = DataStore::from_documents(json!({}), make_items(), make_locations());
    let Some(sword) = store.items().and_then(|items| items.get(&10)) else {
        return;
    };

    c.bench_function("augment_views_sword", |b| {
        b.iter(|| {
            black_box(sword.augment_cost(&store));
            black_box(sword.augment_stats(&store));
        });
    });
}

criterion_group!(benches, bench_index, bench_lookups, bench_views);
criterion_main!(benches);
