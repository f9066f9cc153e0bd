use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub prompt: String,
    pub complexity: u8,
    #[serde(rename = "colorUsage")]
    pub color_usage: u8,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "svgCode")]
    pub svg_code: String,
}

impl HistoryItem {
    /// Versioning identity: two items are revisions of the same configuration
    /// when prompt, both selectors and model all match.
    pub fn same_config(&self, config: &HistoryConfig<'_>) -> bool {
        self.prompt == config.prompt
            && self.complexity == config.complexity
            && self.color_usage == config.color_usage
            && self.model == config.model
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HistoryConfig<'a> {
    pub prompt: &'a str,
    pub complexity: u8,
    pub color_usage: u8,
    pub model: &'a str,
}

/// One rendered row of the history list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    pub index: usize,
    pub label: String,
    pub timestamp: String,
}

/// Newest-first, size-bounded generation log persisted as a JSON array.
#[derive(Clone)]
pub struct History {
    store: Rc<dyn KeyValueStore>,
    key: String,
    cap: usize,
}

impl History {
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>, cap: usize) -> Self {
        Self {
            store,
            key: key.into(),
            cap: cap.max(1),
        }
    }

    pub fn entries(&self) -> Vec<HistoryItem> {
        let Some(raw) = self.store.get(&self.key) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<HistoryItem> {
        self.entries().into_iter().nth(index)
    }

    pub fn record(&self, config: HistoryConfig<'_>, svg_code: &str, timestamp: &str) -> HistoryItem {
        let mut entries = self.entries();
        let version = next_version(&entries, &config);
        let item = HistoryItem {
            prompt: config.prompt.to_string(),
            complexity: config.complexity,
            color_usage: config.color_usage,
            model: config.model.to_string(),
            version,
            timestamp: timestamp.to_string(),
            svg_code: svg_code.to_string(),
        };
        entries.insert(0, item.clone());
        entries.truncate(self.cap);
        self.persist(&entries);
        item
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.entries()
            .iter()
            .enumerate()
            .map(|(index, item)| HistoryRow {
                index,
                label: row_label(item),
                timestamp: item.timestamp.clone(),
            })
            .collect()
    }

    fn persist(&self, entries: &[HistoryItem]) {
        let Ok(raw) = serde_json::to_string(entries) else {
            return;
        };
        self.store.set(&self.key, &raw);
    }
}

pub fn next_version(entries: &[HistoryItem], config: &HistoryConfig<'_>) -> u32 {
    entries
        .iter()
        .filter(|item| item.same_config(config))
        .map(|item| item.version.saturating_add(1))
        .fold(1, u32::max)
}

pub fn row_label(item: &HistoryItem) -> String {
    let version = if item.version > 0 {
        format!(" (v{})", item.version)
    } else {
        String::new()
    };
    let model = if item.model.is_empty() {
        "Default"
    } else {
        item.model.as_str()
    };
    format!(
        "{}{} (Cmplx:{}, Clr:{}, M:{})",
        item.prompt, version, item.complexity, item.color_usage, model
    )
}
