use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ANALYZING_PLACEHOLDER: &str = "Analyzing...";
pub const MARKDOWN_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnalysisKey {
    Metadata,
    Semantic,
    Layout,
    ContentStyling,
    Ocr,
}

impl AnalysisKey {
    pub const ALL: [AnalysisKey; 5] = [
        AnalysisKey::Metadata,
        AnalysisKey::Semantic,
        AnalysisKey::Layout,
        AnalysisKey::ContentStyling,
        AnalysisKey::Ocr,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AnalysisKey::Metadata => "metadata",
            AnalysisKey::Semantic => "semantic",
            AnalysisKey::Layout => "layout",
            AnalysisKey::ContentStyling => "content_styling",
            AnalysisKey::Ocr => "ocr",
        }
    }

    pub fn from_key(raw: &str) -> Option<AnalysisKey> {
        AnalysisKey::ALL.into_iter().find(|key| key.key() == raw)
    }

    pub fn element_id(self) -> String {
        format!("analysis-{}", self.key())
    }

    /// `content_styling` → `Content styling Analysis:`
    pub fn label(self) -> String {
        let spaced = self.key().replace('_', " ");
        let mut chars = spaced.chars();
        let mut label = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        label.push_str(" Analysis:");
        label
    }
}

/// The `analysis_data` body sent to the recreate endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub metadata: String,
    pub semantic: String,
    pub layout: String,
    pub content_styling: String,
    pub ocr: String,
}

impl AnalysisData {
    fn slot_mut(&mut self, key: AnalysisKey) -> &mut String {
        match key {
            AnalysisKey::Metadata => &mut self.metadata,
            AnalysisKey::Semantic => &mut self.semantic,
            AnalysisKey::Layout => &mut self.layout,
            AnalysisKey::ContentStyling => &mut self.content_styling,
            AnalysisKey::Ocr => &mut self.ocr,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisGatherError {
    pub missing: Vec<AnalysisKey>,
}

impl fmt::Display for AnalysisGatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Error gathering analysis data.")
    }
}

impl std::error::Error for AnalysisGatherError {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisField {
    pub value: String,
    pub placeholder: String,
    pub enabled: bool,
    pub error: bool,
}

/// The editable analysis section of the extractor tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisPanel {
    visible: bool,
    fields: BTreeMap<AnalysisKey, AnalysisField>,
    recreate_enabled: bool,
    copy_enabled: bool,
}

impl AnalysisPanel {
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn recreate_enabled(&self) -> bool {
        self.recreate_enabled
    }

    pub fn copy_enabled(&self) -> bool {
        self.copy_enabled
    }

    pub fn field(&self, key: AnalysisKey) -> Option<&AnalysisField> {
        self.fields.get(&key)
    }

    /// Fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = (AnalysisKey, &AnalysisField)> {
        AnalysisKey::ALL
            .into_iter()
            .filter_map(|key| self.fields.get(&key).map(|field| (key, field)))
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Builds disabled placeholders for every key before the call resolves.
    pub fn begin(&mut self) {
        self.visible = true;
        self.recreate_enabled = false;
        self.copy_enabled = false;
        self.fields = AnalysisKey::ALL
            .into_iter()
            .map(|key| {
                (
                    key,
                    AnalysisField {
                        value: String::new(),
                        placeholder: ANALYZING_PLACEHOLDER.to_string(),
                        enabled: false,
                        error: false,
                    },
                )
            })
            .collect();
    }

    /// Fills matching fields. Unknown keys are ignored and keys absent from
    /// the response stay disabled.
    pub fn apply<'a>(&mut self, response: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (raw_key, text) in response {
            let Some(key) = AnalysisKey::from_key(raw_key) else {
                continue;
            };
            let Some(field) = self.fields.get_mut(&key) else {
                continue;
            };
            field.value = text.trim().to_string();
            field.enabled = true;
            field.placeholder.clear();
            field.error = false;
        }
        self.recreate_enabled = true;
        self.copy_enabled = true;
    }

    pub fn fail(&mut self, message: &str) {
        for field in self.fields.values_mut() {
            field.value = format!("Error: {message}");
            field.enabled = false;
            field.placeholder.clear();
            field.error = true;
        }
        self.recreate_enabled = false;
        self.copy_enabled = false;
    }

    /// User edit. Disabled fields ignore input.
    pub fn edit(&mut self, key: AnalysisKey, text: &str) -> bool {
        match self.fields.get_mut(&key) {
            Some(field) if field.enabled => {
                field.value = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn gather(&self) -> Result<AnalysisData, AnalysisGatherError> {
        let mut data = AnalysisData::default();
        let mut missing = Vec::new();
        for key in AnalysisKey::ALL {
            match self.fields.get(&key).map(|field| field.value.trim()) {
                Some(text) if !text.is_empty() => *data.slot_mut(key) = text.to_string(),
                _ => missing.push(key),
            }
        }
        if missing.is_empty() {
            Ok(data)
        } else {
            Err(AnalysisGatherError { missing })
        }
    }

    pub fn to_markdown(&self) -> String {
        self.fields()
            .filter(|(_, field)| !field.value.trim().is_empty())
            .map(|(key, field)| format!("## {}\n\n{}", key.label(), field.value.trim()))
            .collect::<Vec<_>>()
            .join(MARKDOWN_SEPARATOR)
    }
}
