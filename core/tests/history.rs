use std::rc::Rc;

use svg_studio_core::config::{HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS};
use svg_studio_core::{History, HistoryConfig, KeyValueStore, MemoryStore};

fn config(prompt: &str) -> HistoryConfig<'_> {
    HistoryConfig {
        prompt,
        complexity: 3,
        color_usage: 2,
        model: "m1",
    }
}

fn history(store: &MemoryStore) -> History {
    History::new(Rc::new(store.clone()), HISTORY_STORAGE_KEY, MAX_HISTORY_ITEMS)
}

#[test]
fn identical_configs_get_increasing_versions() {
    let store = MemoryStore::new();
    let history = history(&store);
    let first = history.record(config("a red circle"), "<svg>1</svg>", "t1");
    let second = history.record(config("a red circle"), "<svg>2</svg>", "t2");
    let third = history.record(config("a red circle"), "<svg>3</svg>", "t3");
    assert_eq!((first.version, second.version, third.version), (1, 2, 3));

    let other = history.record(
        HistoryConfig {
            model: "m2",
            ..config("a red circle")
        },
        "<svg/>",
        "t4",
    );
    assert_eq!(other.version, 1);
}

#[test]
fn history_is_capped_and_drops_oldest() {
    let store = MemoryStore::new();
    let history = history(&store);
    for idx in 0..40 {
        let prompt = format!("prompt {idx}");
        history.record(config(&prompt), "<svg></svg>", "t");
        assert!(history.len() <= MAX_HISTORY_ITEMS);
    }
    let entries = history.entries();
    assert_eq!(entries.len(), MAX_HISTORY_ITEMS);
    assert_eq!(entries[0].prompt, "prompt 39");
    assert_eq!(entries[MAX_HISTORY_ITEMS - 1].prompt, "prompt 25");
}

#[test]
fn versions_survive_truncation_of_older_copies() {
    let store = MemoryStore::new();
    let history = history(&store);
    history.record(config("kept"), "<svg/>", "t");
    history.record(config("kept"), "<svg/>", "t");
    let next = history.record(config("kept"), "<svg/>", "t");
    assert_eq!(next.version, 3);
}

#[test]
fn persisted_json_uses_camel_case_keys() {
    let store = MemoryStore::new();
    let history = history(&store);
    history.record(config("cat"), "<svg></svg>", "10/16/2026, 9:00:00 AM");
    let raw = store.get(HISTORY_STORAGE_KEY).expect("history persisted");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json array");
    let item = &value[0];
    assert_eq!(item["colorUsage"], 2);
    assert_eq!(item["svgCode"], "<svg></svg>");
    assert_eq!(item["version"], 1);
    assert_eq!(item["timestamp"], "10/16/2026, 9:00:00 AM");
}

#[test]
fn corrupt_storage_reads_as_empty() {
    let store = MemoryStore::new();
    store.set(HISTORY_STORAGE_KEY, "{not json");
    let history = history(&store);
    assert!(history.is_empty());
    let item = history.record(config("fresh"), "<svg/>", "t");
    assert_eq!(item.version, 1);
    assert_eq!(history.len(), 1);
}

#[test]
fn rows_are_newest_first_with_labels() {
    let store = MemoryStore::new();
    let history = history(&store);
    history.record(config("old"), "<svg/>", "t1");
    history.record(config("new"), "<svg/>", "t2");
    let rows = history.rows();
    assert_eq!(rows[0].index, 0);
    assert_eq!(rows[0].label, "new (v1) (Cmplx:3, Clr:2, M:m1)");
    assert_eq!(rows[0].timestamp, "t2");
    assert_eq!(rows[1].label, "old (v1) (Cmplx:3, Clr:2, M:m1)");
}

#[test]
fn clear_erases_everything() {
    let store = MemoryStore::new();
    let history = history(&store);
    history.record(config("x"), "<svg/>", "t");
    history.clear();
    assert!(history.is_empty());
    assert!(store.get(HISTORY_STORAGE_KEY).is_none());
}
