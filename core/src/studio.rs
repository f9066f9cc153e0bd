use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::analysis::{AnalysisGatherError, AnalysisKey, AnalysisPanel};
use crate::api::{AnalyzeRequest, ApiError, ConvertRequest, GenerateRequest, RefineRequest};
use crate::background::PreviewBackground;
use crate::button_group::ButtonGroup;
use crate::config::{
    default_model, StudioConfig, EXTRACTOR_MODELS, GENERATOR_MODELS, REFINE_MODELS,
};
use crate::history::{History, HistoryConfig, HistoryItem, HistoryRow};
use crate::preview::{classify, PreviewState, SvgParser};
use crate::raster::{
    link_dimension, parse_dimension_input, DimensionField, RasterError, SizePolicy,
    AUTO_PLACEHOLDER,
};
use crate::status::{Channel, Status};
use crate::store::KeyValueStore;
use crate::tabs::{Tab, TabSet};

pub const DEFAULT_COMPLEXITY: u8 = 3;
pub const DEFAULT_COLOR_USAGE: u8 = 3;
pub const INVALID_FILE_LABEL: &str = "Invalid file type chosen";
pub const NO_FILE_LABEL: &str = "No file chosen";

const REFINE_PROMPT_SNIPPET_CHARS: usize = 20;

/// Entry-guard violations, reported before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardError {
    EmptyPrompt,
    MissingImage,
    MissingImageData,
    IncompleteAnalysis(AnalysisGatherError),
    EmptySvg,
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::EmptyPrompt => f.write_str("Please enter a prompt."),
            GuardError::MissingImage => f.write_str("Please upload an image first."),
            GuardError::MissingImageData => f.write_str("Missing image data."),
            GuardError::IncompleteAnalysis(err) => err.fmt(f),
            GuardError::EmptySvg => f.write_str("No SVG code in the editor to refine."),
        }
    }
}

impl std::error::Error for GuardError {}

/// Anything that can fail a remote-call controller after its guard passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallError {
    Api(ApiError),
    Raster(RasterError),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Api(err) => err.fmt(f),
            CallError::Raster(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CallError {}

impl From<ApiError> for CallError {
    fn from(err: ApiError) -> Self {
        CallError::Api(err)
    }
}

impl From<RasterError> for CallError {
    fn from(err: RasterError) -> Self {
        CallError::Raster(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    pub name: String,
    pub data_url: String,
}

/// Captured at refine time so the history entry and the request agree even
/// if the user keeps typing while the call is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefineDraft {
    pub svg_code: String,
    pub refinement_prompt: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngDimensionInputs {
    pub width: String,
    pub height: String,
    pub width_placeholder: String,
    pub height_placeholder: String,
    pub width_auto: bool,
    pub height_auto: bool,
}

impl Default for PngDimensionInputs {
    fn default() -> Self {
        Self {
            width: String::new(),
            height: String::new(),
            width_placeholder: AUTO_PLACEHOLDER.to_string(),
            height_placeholder: AUTO_PLACEHOLDER.to_string(),
            width_auto: false,
            height_auto: false,
        }
    }
}

/// Page-lifetime UI controller: every piece of mutable UI state plus the
/// guard/pending/settle transitions of the four remote calls. Rendering and
/// I/O stay outside.
pub struct Studio {
    config: StudioConfig,
    parser: Rc<dyn SvgParser>,
    clock: Rc<dyn Fn() -> String>,
    prefs: Rc<dyn KeyValueStore>,
    history: History,
    tabs: TabSet,
    complexity: ButtonGroup,
    color_usage: ButtonGroup,
    background: PreviewBackground,
    prompt: String,
    generator_model: String,
    editor: String,
    preview: PreviewState,
    preview_source: String,
    png_inputs: PngDimensionInputs,
    image: Option<UploadedImage>,
    file_label: String,
    analysis_prompt: String,
    extractor_model: String,
    analysis: AnalysisPanel,
    refine_prompt: String,
    refine_model: String,
    statuses: [Status; 4],
}

impl Studio {
    pub fn new(
        config: StudioConfig,
        session: Rc<dyn KeyValueStore>,
        prefs: Rc<dyn KeyValueStore>,
        parser: Rc<dyn SvgParser>,
        clock: Rc<dyn Fn() -> String>,
    ) -> Self {
        let history = History::new(session, config.history_key.clone(), config.max_history_items);
        let background = prefs
            .get(&config.background_key)
            .and_then(|raw| PreviewBackground::from_key(&raw))
            .unwrap_or_default();
        Self {
            config,
            parser,
            clock,
            prefs,
            history,
            tabs: TabSet::default(),
            complexity: ButtonGroup::levels(DEFAULT_COMPLEXITY),
            color_usage: ButtonGroup::levels(DEFAULT_COLOR_USAGE),
            background,
            prompt: String::new(),
            generator_model: default_model(GENERATOR_MODELS).to_string(),
            editor: String::new(),
            preview: PreviewState::Placeholder,
            preview_source: String::new(),
            png_inputs: PngDimensionInputs::default(),
            image: None,
            file_label: NO_FILE_LABEL.to_string(),
            analysis_prompt: String::new(),
            extractor_model: default_model(EXTRACTOR_MODELS).to_string(),
            analysis: AnalysisPanel::default(),
            refine_prompt: String::new(),
            refine_model: default_model(REFINE_MODELS).to_string(),
            statuses: Default::default(),
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    // --- tabs & selectors ---

    pub fn tabs(&self) -> TabSet {
        self.tabs
    }

    pub fn switch_tab(&mut self, id: &str) {
        self.tabs.switch(id);
    }

    pub fn complexity(&self) -> &ButtonGroup {
        &self.complexity
    }

    pub fn color_usage(&self) -> &ButtonGroup {
        &self.color_usage
    }

    pub fn click_complexity(&mut self, value: u8) -> bool {
        self.complexity.select(value)
    }

    pub fn click_color_usage(&mut self, value: u8) -> bool {
        self.color_usage.select(value)
    }

    pub fn background(&self) -> PreviewBackground {
        self.background
    }

    pub fn set_background(&mut self, background: PreviewBackground) {
        self.background = background;
        self.prefs.set(&self.config.background_key, background.key());
    }

    // --- form fields ---

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }

    pub fn generator_model(&self) -> &str {
        &self.generator_model
    }

    pub fn set_generator_model(&mut self, model: &str) {
        self.generator_model = model.to_string();
    }

    pub fn analysis_prompt(&self) -> &str {
        &self.analysis_prompt
    }

    pub fn set_analysis_prompt(&mut self, text: &str) {
        self.analysis_prompt = text.to_string();
    }

    pub fn extractor_model(&self) -> &str {
        &self.extractor_model
    }

    pub fn set_extractor_model(&mut self, model: &str) {
        self.extractor_model = model.to_string();
    }

    pub fn refine_prompt(&self) -> &str {
        &self.refine_prompt
    }

    pub fn set_refine_prompt(&mut self, text: &str) {
        self.refine_prompt = text.to_string();
    }

    pub fn refine_model(&self) -> &str {
        &self.refine_model
    }

    pub fn set_refine_model(&mut self, model: &str) {
        self.refine_model = model.to_string();
    }

    // --- editor & preview ---

    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Stores editor text without re-rendering; the caller debounces
    /// `update_preview`.
    pub fn edit_editor(&mut self, text: &str) {
        self.editor = text.to_string();
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn update_preview(&mut self) -> &PreviewState {
        self.preview = classify(&self.editor, self.parser.as_ref());
        self.preview_source.clone_from(&self.editor);
        &self.preview
    }

    /// Editor text the current preview state was classified from.
    pub fn preview_source(&self) -> &str {
        &self.preview_source
    }

    pub fn exports_enabled(&self) -> bool {
        self.preview.exports_enabled()
    }

    fn replace_editor(&mut self, text: &str) {
        self.editor = text.to_string();
        self.update_preview();
    }

    // --- PNG dimensions ---

    pub fn png_inputs(&self) -> &PngDimensionInputs {
        &self.png_inputs
    }

    pub fn edit_png_dimension(&mut self, field: DimensionField, raw: &str) {
        match field {
            DimensionField::Width => self.png_inputs.width = raw.to_string(),
            DimensionField::Height => self.png_inputs.height = raw.to_string(),
        }
        let Some(info) = self.preview.svg_info() else {
            return;
        };
        let linked = link_dimension(field, raw, info.aspect_ratio());
        let inputs = &mut self.png_inputs;
        match linked.field {
            DimensionField::Width => {
                inputs.width = linked.value;
                inputs.width_placeholder = linked.placeholder;
                inputs.width_auto = linked.auto_populated;
                if linked.auto_populated {
                    inputs.height_auto = false;
                }
            }
            DimensionField::Height => {
                inputs.height = linked.value;
                inputs.height_placeholder = linked.placeholder;
                inputs.height_auto = linked.auto_populated;
                if linked.auto_populated {
                    inputs.width_auto = false;
                }
            }
        }
    }

    pub fn png_size_policy(&self) -> SizePolicy {
        SizePolicy::Explicit {
            width: parse_dimension_input(&self.png_inputs.width),
            height: parse_dimension_input(&self.png_inputs.height),
            min_dimension: self.config.refine_min_dimension,
        }
    }

    pub fn refine_size_policy(&self) -> SizePolicy {
        SizePolicy::Upscale {
            min_dimension: self.config.refine_min_dimension,
        }
    }

    // --- history ---

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.history.rows()
    }

    pub fn history_entries(&self) -> Vec<HistoryItem> {
        self.history.entries()
    }

    /// Copies entry `index` back into the generator form and editor.
    /// Out-of-range indexes are ignored.
    pub fn load_history(&mut self, index: usize) -> bool {
        let Some(item) = self.history.get(index) else {
            return false;
        };
        self.prompt = item.prompt.clone();
        self.complexity.select(item.complexity);
        self.color_usage.select(item.color_usage);
        if !item.model.is_empty() {
            self.generator_model = item.model.clone();
        }
        self.replace_editor(&item.svg_code);
        self.tabs.show(Tab::Generator);
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record_history(&self, prompt: &str, model: &str, svg_code: &str) -> HistoryItem {
        let timestamp = (self.clock)();
        self.history.record(
            HistoryConfig {
                prompt,
                complexity: self.complexity.selected_or_default(),
                color_usage: self.color_usage.selected_or_default(),
                model,
            },
            svg_code,
            &timestamp,
        )
    }

    // --- status lines ---

    pub fn status(&self, channel: Channel) -> &Status {
        &self.statuses[channel.index()]
    }

    pub fn busy(&self, channel: Channel) -> bool {
        self.status(channel).is_pending()
    }

    pub fn expire_status(&mut self, channel: Channel, generation: u64) -> bool {
        self.status_mut(channel).expire(generation)
    }

    fn status_mut(&mut self, channel: Channel) -> &mut Status {
        &mut self.statuses[channel.index()]
    }

    fn reject(&mut self, channel: Channel, err: GuardError) -> GuardError {
        self.status_mut(channel).fail(err.to_string());
        err
    }

    fn settle<T>(&mut self, channel: Channel, outcome: &Result<T, CallError>) -> u64 {
        match outcome {
            Ok(_) => self.status_mut(channel).succeed(channel.success_text()),
            Err(err) => {
                let text = format!("{}: {err}", channel.failure_prefix());
                self.status_mut(channel).fail(text)
            }
        }
    }

    // --- generate ---

    pub fn begin_generate(&mut self) -> Result<GenerateRequest, GuardError> {
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(self.reject(Channel::Generate, GuardError::EmptyPrompt));
        }
        let request = GenerateRequest {
            prompt,
            complexity: self.complexity.selected_or_default(),
            color_usage: self.color_usage.selected_or_default(),
            model: self.generator_model.clone(),
        };
        self.status_mut(Channel::Generate).pending("Generating SVG...");
        self.replace_editor("");
        Ok(request)
    }

    /// Returns the status generation to hand to the auto-clear timer.
    pub fn finish_generate(
        &mut self,
        request: &GenerateRequest,
        outcome: Result<String, CallError>,
    ) -> u64 {
        let generation = self.settle(Channel::Generate, &outcome);
        match outcome {
            Ok(svg_code) => {
                self.replace_editor(&svg_code);
                let timestamp = (self.clock)();
                self.history.record(
                    HistoryConfig {
                        prompt: &request.prompt,
                        complexity: request.complexity,
                        color_usage: request.color_usage,
                        model: &request.model,
                    },
                    &svg_code,
                    &timestamp,
                );
            }
            Err(_) => self.replace_editor(""),
        }
        generation
    }

    // --- image upload ---

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn file_label(&self) -> &str {
        &self.file_label
    }

    pub fn load_image(&mut self, name: &str, data_url: &str) {
        self.file_label = name.to_string();
        self.image = Some(UploadedImage {
            name: name.to_string(),
            data_url: data_url.to_string(),
        });
        self.analysis.hide();
        self.status_mut(Channel::Analyze).reset();
    }

    pub fn reject_image(&mut self) {
        self.file_label = INVALID_FILE_LABEL.to_string();
        self.image = None;
    }

    pub fn image_read_failed(&mut self) {
        self.image = None;
    }

    // --- analyze ---

    pub fn analysis(&self) -> &AnalysisPanel {
        &self.analysis
    }

    pub fn edit_analysis(&mut self, key: AnalysisKey, text: &str) -> bool {
        self.analysis.edit(key, text)
    }

    pub fn analysis_markdown(&self) -> String {
        self.analysis.to_markdown()
    }

    pub fn begin_analyze(&mut self) -> Result<AnalyzeRequest, GuardError> {
        let Some(image) = self.image.as_ref() else {
            return Err(self.reject(Channel::Analyze, GuardError::MissingImage));
        };
        let request = AnalyzeRequest {
            image_data: image.data_url.clone(),
            context_prompt: self.analysis_prompt.trim().to_string(),
            model: self.extractor_model.clone(),
        };
        self.status_mut(Channel::Analyze).pending("Analyzing image...");
        self.status_mut(Channel::Recreate).reset();
        self.analysis.begin();
        Ok(request)
    }

    pub fn finish_analyze(&mut self, outcome: Result<BTreeMap<String, String>, CallError>) -> u64 {
        let generation = self.settle(Channel::Analyze, &outcome);
        match outcome {
            Ok(sections) => self
                .analysis
                .apply(sections.iter().map(|(key, text)| (key.as_str(), text.as_str()))),
            Err(err) => self.analysis.fail(&err.to_string()),
        }
        generation
    }

    // --- recreate ---

    pub fn begin_recreate(&mut self) -> Result<ConvertRequest, GuardError> {
        let Some(image) = self.image.as_ref() else {
            return Err(self.reject(Channel::Recreate, GuardError::MissingImageData));
        };
        let image_data = image.data_url.clone();
        let analysis_data = match self.analysis.gather() {
            Ok(data) => data,
            Err(err) => return Err(self.reject(Channel::Recreate, GuardError::IncompleteAnalysis(err))),
        };
        self.status_mut(Channel::Recreate).pending("Recreating SVG...");
        Ok(ConvertRequest {
            image_data,
            analysis_data,
            model: self.extractor_model.clone(),
        })
    }

    pub fn finish_recreate(&mut self, outcome: Result<String, CallError>) -> u64 {
        let generation = self.settle(Channel::Recreate, &outcome);
        if let Ok(svg_code) = outcome {
            self.replace_editor(&svg_code);
        }
        generation
    }

    // --- refine ---

    pub fn begin_refine(&mut self) -> Result<RefineDraft, GuardError> {
        let svg_code = self.editor.trim().to_string();
        if svg_code.is_empty() {
            return Err(self.reject(Channel::Refine, GuardError::EmptySvg));
        }
        self.status_mut(Channel::Refine)
            .pending("Generating preview PNG...");
        Ok(RefineDraft {
            svg_code,
            refinement_prompt: self.refine_prompt.trim().to_string(),
            model: self.refine_model.clone(),
        })
    }

    /// Second pending phase, once the preview raster exists.
    pub fn refine_request(&mut self, draft: &RefineDraft, png_data: String) -> RefineRequest {
        self.status_mut(Channel::Refine)
            .pending("Refining SVG with analysis...");
        RefineRequest {
            svg_code: draft.svg_code.clone(),
            refinement_prompt: draft.refinement_prompt.clone(),
            model: draft.model.clone(),
            png_data,
        }
    }

    pub fn finish_refine(&mut self, draft: &RefineDraft, outcome: Result<String, CallError>) -> u64 {
        let generation = self.settle(Channel::Refine, &outcome);
        if let Ok(svg_code) = outcome {
            self.replace_editor(&svg_code);
            self.refine_prompt.clear();
            let prompt = refined_prompt(self.prompt.trim(), &draft.refinement_prompt);
            self.record_history(&prompt, &draft.model, &svg_code);
        }
        generation
    }
}

pub fn refined_prompt(prompt: &str, instructions: &str) -> String {
    if instructions.is_empty() {
        return format!("{prompt} (Refined - Auto)");
    }
    let snippet: String = instructions.chars().take(REFINE_PROMPT_SNIPPET_CHARS).collect();
    format!("{prompt} (Refined: {snippet}...)")
}
