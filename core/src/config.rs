pub const HISTORY_STORAGE_KEY: &str = "svgGeneratorHistory";
pub const BACKGROUND_STORAGE_KEY: &str = "previewBackground";

pub const MAX_HISTORY_ITEMS: usize = 15;

pub const PREVIEW_DEBOUNCE_MS: u32 = 300;
pub const STATUS_CLEAR_MS: u32 = 5_000;
pub const COPY_CODE_FEEDBACK_MS: u32 = 2_000;
pub const COPY_MARKDOWN_FEEDBACK_MS: u32 = 1_500;

pub const REFINE_MIN_DIMENSION: u32 = 1_000;
pub const RASTER_QUALITY_SCALE: f64 = 2.0;

pub const GENERATE_PATH: &str = "/generate";
pub const ANALYZE_PATH: &str = "/analyze_image";
pub const CONVERT_PATH: &str = "/convert_to_svg";
pub const REFINE_PATH: &str = "/refine_svg";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelChoice {
    pub id: &'static str,
    pub label: &'static str,
}

pub const GENERATOR_MODELS: &[ModelChoice] = &[
    ModelChoice {
        id: "gemini-2.5-pro-exp-03-25",
        label: "Gemini 2.5 Pro (experimental)",
    },
    ModelChoice {
        id: "gemini-2.5-flash-preview-04-17",
        label: "Gemini 2.5 Flash (preview)",
    },
    ModelChoice {
        id: "gemini-2.0-flash",
        label: "Gemini 2.0 Flash",
    },
];

pub const EXTRACTOR_MODELS: &[ModelChoice] = &[
    ModelChoice {
        id: "gemini-2.0-flash",
        label: "Gemini 2.0 Flash",
    },
    ModelChoice {
        id: "gemini-2.5-flash-preview-04-17",
        label: "Gemini 2.5 Flash (preview)",
    },
    ModelChoice {
        id: "gemini-2.5-pro-exp-03-25",
        label: "Gemini 2.5 Pro (experimental)",
    },
];

pub const REFINE_MODELS: &[ModelChoice] = &[
    ModelChoice {
        id: "gemini-2.5-flash-preview-04-17",
        label: "Gemini 2.5 Flash (preview)",
    },
    ModelChoice {
        id: "gemini-2.5-pro-exp-03-25",
        label: "Gemini 2.5 Pro (experimental)",
    },
    ModelChoice {
        id: "gemini-2.0-flash",
        label: "Gemini 2.0 Flash",
    },
];

/// Runtime tunables for one page load. `Default` mirrors the constants above.
#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    pub api_base: String,
    pub preview_debounce_ms: u32,
    pub status_clear_ms: u32,
    pub copy_code_feedback_ms: u32,
    pub copy_markdown_feedback_ms: u32,
    pub max_history_items: usize,
    pub history_key: String,
    pub background_key: String,
    pub refine_min_dimension: u32,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            preview_debounce_ms: PREVIEW_DEBOUNCE_MS,
            status_clear_ms: STATUS_CLEAR_MS,
            copy_code_feedback_ms: COPY_CODE_FEEDBACK_MS,
            copy_markdown_feedback_ms: COPY_MARKDOWN_FEEDBACK_MS,
            max_history_items: MAX_HISTORY_ITEMS,
            history_key: HISTORY_STORAGE_KEY.to_string(),
            background_key: BACKGROUND_STORAGE_KEY.to_string(),
            refine_min_dimension: REFINE_MIN_DIMENSION,
        }
    }
}

impl StudioConfig {
    pub fn with_api_base(mut self, raw: &str) -> Self {
        self.api_base = normalize_api_base(raw);
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

pub fn normalize_api_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub fn default_model(choices: &[ModelChoice]) -> &'static str {
    choices.first().map(|choice| choice.id).unwrap_or_default()
}
