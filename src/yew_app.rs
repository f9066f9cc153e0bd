use std::rc::Rc;

use gloo::timers::callback::Timeout;
use gloo::timers::future::TimeoutFuture;
use svg_studio_core::config::{EXTRACTOR_MODELS, GENERATOR_MODELS, REFINE_MODELS};
use svg_studio_core::export::{png_filename, svg_filename, SVG_MIME};
use svg_studio_core::{
    AnalysisKey, ButtonGroup, CallError, Channel, DimensionField, ModelChoice, PreviewBackground,
    PreviewState, RasterError, Status, Studio, Tab, Tone,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    DragEvent, Element, Event, File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    InputEvent,
};
use yew::prelude::*;

use crate::api;
use crate::browser_io::{self, alert, confirm};
use crate::raster;
use crate::studio_core::StudioCore;
use crate::svg_dom;

const NOTHING_TO_SAVE: &str = "Nothing to save. Generate or enter SVG code first.";
const COPY_CODE_FAILED: &str = "Failed to copy code to clipboard.";
const COPY_MARKDOWN_FAILED: &str = "Failed to copy markdown to clipboard.";
const NO_ANALYSIS_TO_COPY: &str = "No analysis content available to copy.";
const NOT_AN_IMAGE: &str = "Please select an image file (e.g., JPG, PNG, GIF).";
const FILE_READ_FAILED: &str = "Error reading file.";
const CLEAR_HISTORY_QUESTION: &str =
    "Are you sure you want to clear the generation history for this session?";

const COPY_CODE_LABEL: &str = "Copy Code";
const COPY_MARKDOWN_LABEL: &str = "Copy as Markdown";
const COPIED_LABEL: &str = "Copied!";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<StudioCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn schedule_status_expiry(core: Rc<StudioCore>, channel: Channel, generation: u64) {
    let delay = core.config().status_clear_ms;
    spawn_local(async move {
        TimeoutFuture::new(delay).await;
        let current = core.with(|studio| studio.status(channel).generation() == generation);
        if current {
            core.update(|studio| studio.expire_status(channel, generation));
        }
    });
}

fn run_generate(core: Rc<StudioCore>) {
    let Ok(request) = core.update(|studio| studio.begin_generate()) else {
        return;
    };
    let config = core.config();
    spawn_local(async move {
        let outcome = api::generate(&config, &request)
            .await
            .map_err(CallError::from);
        let generation = core.update(|studio| studio.finish_generate(&request, outcome));
        schedule_status_expiry(core, Channel::Generate, generation);
    });
}

fn run_analyze(core: Rc<StudioCore>) {
    let Ok(request) = core.update(|studio| studio.begin_analyze()) else {
        return;
    };
    let config = core.config();
    spawn_local(async move {
        let outcome = api::analyze(&config, &request)
            .await
            .map_err(CallError::from);
        let generation = core.update(|studio| studio.finish_analyze(outcome));
        schedule_status_expiry(core, Channel::Analyze, generation);
    });
}

fn run_recreate(core: Rc<StudioCore>) {
    let Ok(request) = core.update(|studio| studio.begin_recreate()) else {
        return;
    };
    let config = core.config();
    spawn_local(async move {
        let outcome = api::recreate(&config, &request)
            .await
            .map_err(CallError::from);
        let generation = core.update(|studio| studio.finish_recreate(outcome));
        schedule_status_expiry(core, Channel::Recreate, generation);
    });
}

fn run_refine(core: Rc<StudioCore>, preview: Option<Element>) {
    let Ok(draft) = core.update(|studio| studio.begin_refine()) else {
        return;
    };
    spawn_local(async move {
        let outcome: Result<String, CallError> = async {
            let preview = preview.ok_or(RasterError::NoSvg)?;
            let (info, policy) = core.with(|studio| {
                (
                    studio.preview().svg_info().cloned(),
                    studio.refine_size_policy(),
                )
            });
            let info = info.ok_or(RasterError::NoSvg)?;
            let image = raster::rasterize_preview(&preview, &info, policy).await?;
            let request = core.update(|studio| studio.refine_request(&draft, image.data_url));
            let config = core.config();
            api::refine(&config, &request).await.map_err(CallError::from)
        }
        .await;
        if let Err(CallError::Raster(err)) = &outcome {
            gloo::console::error!("refine raster failed", err.to_string());
        }
        let generation = core.update(|studio| studio.finish_refine(&draft, outcome));
        schedule_status_expiry(core, Channel::Refine, generation);
    });
}

fn save_svg(core: &StudioCore) {
    let (code, prompt, exports) = core.with(|studio| {
        (studio.editor().to_string(), studio.prompt().to_string(), studio.exports_enabled())
    });
    if !exports || code.trim().is_empty() {
        alert(NOTHING_TO_SAVE);
        return;
    }
    let filename = svg_filename(&prompt, browser_io::now_ms());
    if let Err(err) = browser_io::download_text(&filename, &code, SVG_MIME) {
        gloo::console::error!("svg download failed", err);
    }
}

fn save_png(core: Rc<StudioCore>, preview: Option<Element>) {
    let (info, policy, prompt) = core.with(|studio| {
        (
            studio.preview().svg_info().cloned(),
            studio.png_size_policy(),
            studio.prompt().to_string(),
        )
    });
    let (Some(preview), Some(info)) = (preview, info) else {
        alert(RasterError::NoSvg.alert_text());
        return;
    };
    spawn_local(async move {
        match raster::rasterize_preview(&preview, &info, policy).await {
            Ok(image) => {
                let filename = png_filename(&prompt, image.size.custom, browser_io::now_ms());
                if let Err(err) = browser_io::download_href(&filename, &image.data_url) {
                    gloo::console::error!("png download failed", err.clone());
                    alert(RasterError::Export(err).alert_text());
                }
            }
            Err(err) => {
                gloo::console::error!("png export failed", err.to_string());
                alert(err.alert_text());
            }
        }
    });
}

fn copy_code(core: &StudioCore, copied: UseStateHandle<bool>) {
    let (code, exports) = core.with(|studio| (studio.editor().to_string(), studio.exports_enabled()));
    if !exports || code.trim().is_empty() {
        return;
    }
    let delay = core.config().copy_code_feedback_ms;
    spawn_local(async move {
        match browser_io::copy_text(&code).await {
            Ok(()) => {
                copied.set(true);
                TimeoutFuture::new(delay).await;
                copied.set(false);
            }
            Err(err) => {
                gloo::console::error!("copy code failed", err);
                alert(COPY_CODE_FAILED);
            }
        }
    });
}

fn copy_markdown(core: &StudioCore, copied: UseStateHandle<bool>) {
    let markdown = core.with(|studio| studio.analysis_markdown());
    if markdown.is_empty() {
        alert(NO_ANALYSIS_TO_COPY);
        return;
    }
    let delay = core.config().copy_markdown_feedback_ms;
    spawn_local(async move {
        match browser_io::copy_text(&markdown).await {
            Ok(()) => {
                copied.set(true);
                TimeoutFuture::new(delay).await;
                copied.set(false);
            }
            Err(err) => {
                gloo::console::error!("copy markdown failed", err);
                alert(COPY_MARKDOWN_FAILED);
            }
        }
    });
}

fn accept_file(core: Rc<StudioCore>, file: File) {
    if !browser_io::is_image(&file) {
        core.update(|studio| studio.reject_image());
        alert(NOT_AN_IMAGE);
        return;
    }
    let name = file.name();
    spawn_local(async move {
        match browser_io::read_data_url(file).await {
            Ok(data_url) => core.update(|studio| studio.load_image(&name, &data_url)),
            Err(err) => {
                gloo::console::error!("image read failed", err);
                core.update(|studio| studio.image_read_failed());
                alert(FILE_READ_FAILED);
            }
        }
    });
}

fn auto_grow(textarea: &HtmlTextAreaElement) {
    let style = textarea.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &format!("{}px", textarea.scroll_height()));
}

fn grow_analysis_fields() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    for key in AnalysisKey::ALL {
        let Some(element) = document.get_element_by_id(&key.element_id()) else {
            continue;
        };
        if let Ok(textarea) = element.dyn_into::<HtmlTextAreaElement>() {
            auto_grow(&textarea);
        }
    }
}

fn status_line(id: &'static str, status: &Status) -> Html {
    let tone = match status.tone() {
        Some(Tone::Info) => "info",
        Some(Tone::Success) => "success",
        Some(Tone::Error) => "error",
        None => "",
    };
    html! {
        <div {id} class={classes!("status-message", tone)}>{ status.text().to_string() }</div>
    }
}

fn button_group(id: &'static str, label: &'static str, group: &ButtonGroup, on_pick: Callback<u8>) -> Html {
    let buttons: Html = group
        .values()
        .iter()
        .copied()
        .map(|value| {
            let on_pick = on_pick.clone();
            let active = group.is_active(value);
            html! {
                <button
                    type="button"
                    class={classes!("group-btn", active.then_some("active"))}
                    data-value={value.to_string()}
                    onclick={Callback::from(move |_| on_pick.emit(value))}
                >
                    { value.to_string() }
                </button>
            }
        })
        .collect();
    html! {
        <div class="control-group">
            <label>{ label }</label>
            <div {id} class="button-group">{ buttons }</div>
        </div>
    }
}

fn model_select(
    id: &'static str,
    choices: &'static [ModelChoice],
    selected: &str,
    on_pick: Callback<String>,
) -> Html {
    let options: Html = choices
        .iter()
        .map(|choice| {
            html! {
                <option value={choice.id} selected={choice.id == selected}>{ choice.label }</option>
            }
        })
        .collect();
    let onchange = Callback::from(move |event: Event| {
        let select: HtmlSelectElement = event.target_unchecked_into();
        on_pick.emit(select.value());
    });
    html! {
        <select {id} {onchange}>{ options }</select>
    }
}

fn tab_bar(studio: &Studio, core: &Rc<StudioCore>) -> Html {
    let tabs = studio.tabs();
    Tab::ALL
        .iter()
        .copied()
        .map(|tab| {
            let core = core.clone();
            let onclick = Callback::from(move |_| core.update(|studio| studio.switch_tab(tab.id())));
            html! {
                <button
                    type="button"
                    class={classes!("tab-link", tabs.is_visible(tab).then_some("active"))}
                    data-tab={tab.id()}
                    {onclick}
                >
                    { tab.label() }
                </button>
            }
        })
        .collect()
}

fn generator_panel(studio: &Studio, core: &Rc<StudioCore>) -> Html {
    let on_prompt = {
        let core = core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            core.update(|studio| studio.set_prompt(&input.value()));
        })
    };
    let on_complexity = {
        let core = core.clone();
        Callback::from(move |value: u8| {
            core.update(|studio| studio.click_complexity(value));
        })
    };
    let on_color_usage = {
        let core = core.clone();
        Callback::from(move |value: u8| {
            core.update(|studio| studio.click_color_usage(value));
        })
    };
    let on_model = {
        let core = core.clone();
        Callback::from(move |model: String| core.update(|studio| studio.set_generator_model(&model)))
    };
    let on_generate = {
        let core = core.clone();
        Callback::from(move |_| run_generate(core.clone()))
    };
    let busy = studio.busy(Channel::Generate);
    html! {
        <div
            id={Tab::Generator.id()}
            class={classes!("tab-content", studio.tabs().is_visible(Tab::Generator).then_some("active"))}
        >
            <label for="prompt">{ "Describe the SVG" }</label>
            <textarea id="prompt" value={studio.prompt().to_string()} oninput={on_prompt} />
            { button_group("complexity-group", "Complexity", studio.complexity(), on_complexity) }
            { button_group("color-usage-group", "Color usage", studio.color_usage(), on_color_usage) }
            { model_select("model-select", GENERATOR_MODELS, studio.generator_model(), on_model) }
            <button id="generate-btn" type="button" disabled={busy} onclick={on_generate}>
                { if busy { "Generating..." } else { "Generate SVG" } }
            </button>
            { status_line("status-message", studio.status(Channel::Generate)) }
        </div>
    }
}

fn analysis_section(studio: &Studio, core: &Rc<StudioCore>, markdown_copied: &UseStateHandle<bool>) -> Html {
    let panel = studio.analysis();
    if !panel.visible() {
        return html! {};
    }
    let blocks: Html = panel
        .fields()
        .map(|(key, field)| {
            let core = core.clone();
            let oninput = Callback::from(move |event: InputEvent| {
                let textarea: HtmlTextAreaElement = event.target_unchecked_into();
                auto_grow(&textarea);
                core.update(|studio| studio.edit_analysis(key, &textarea.value()));
            });
            html! {
                <div class="analysis-block">
                    <label for={key.element_id()}>{ key.label() }</label>
                    <textarea
                        id={key.element_id()}
                        class={classes!(field.error.then_some("error"))}
                        value={field.value.clone()}
                        placeholder={field.placeholder.clone()}
                        disabled={!field.enabled}
                        {oninput}
                    />
                </div>
            }
        })
        .collect();
    let on_recreate = {
        let core = core.clone();
        Callback::from(move |_| run_recreate(core.clone()))
    };
    let on_copy = {
        let core = core.clone();
        let markdown_copied = markdown_copied.clone();
        Callback::from(move |_| copy_markdown(&core, markdown_copied.clone()))
    };
    let copied = **markdown_copied;
    let recreate_busy = studio.busy(Channel::Recreate);
    html! {
        <div id="analysis-results-section">
            <h3>{ "2. Review & Edit Analysis" }</h3>
            { blocks }
            <button
                id="recreate-svg-btn"
                type="button"
                disabled={!panel.recreate_enabled() || recreate_busy}
                onclick={on_recreate}
            >
                { "Recreate SVG" }
            </button>
            <button
                id="copy-markdown-btn"
                type="button"
                disabled={!panel.copy_enabled() || copied}
                onclick={on_copy}
            >
                { if copied { COPIED_LABEL } else { COPY_MARKDOWN_LABEL } }
            </button>
            { status_line("recreate-svg-status", studio.status(Channel::Recreate)) }
        </div>
    }
}

fn extractor_panel(
    studio: &Studio,
    core: &Rc<StudioCore>,
    drag_over: &UseStateHandle<bool>,
    markdown_copied: &UseStateHandle<bool>,
) -> Html {
    let on_file = {
        let core = core.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                accept_file(core.clone(), file);
            }
        })
    };
    let on_drag_over = {
        let drag_over = drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(true);
        })
    };
    let on_drag_leave = {
        let drag_over = drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(false);
        })
    };
    let on_drop = {
        let core = core.clone();
        let drag_over = drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            drag_over.set(false);
            let file = event
                .data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                accept_file(core.clone(), file);
            }
        })
    };
    let on_context = {
        let core = core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            core.update(|studio| studio.set_analysis_prompt(&input.value()));
        })
    };
    let on_model = {
        let core = core.clone();
        Callback::from(move |model: String| core.update(|studio| studio.set_extractor_model(&model)))
    };
    let on_analyze = {
        let core = core.clone();
        Callback::from(move |_| run_analyze(core.clone()))
    };
    let image_preview = match studio.image() {
        Some(image) => html! {
            <div id="image-preview-container">
                <img id="image-preview" src={image.data_url.clone()} alt={image.name.clone()} />
            </div>
        },
        None => html! {},
    };
    let analyze_busy = studio.busy(Channel::Analyze);
    html! {
        <div
            id={Tab::Extractor.id()}
            class={classes!("tab-content", studio.tabs().is_visible(Tab::Extractor).then_some("active"))}
        >
            <div
                id="drop-zone"
                class={classes!("drop-zone", drag_over.then_some("dragover"))}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}
            >
                <input id="image-upload" type="file" accept="image/*" onchange={on_file} />
                <span id="file-name">{ studio.file_label().to_string() }</span>
            </div>
            { image_preview }
            <label for="analysis-prompt">{ "Context (optional)" }</label>
            <textarea
                id="analysis-prompt"
                value={studio.analysis_prompt().to_string()}
                oninput={on_context}
            />
            { model_select("extractor-model-select", EXTRACTOR_MODELS, studio.extractor_model(), on_model) }
            <button id="analyze-btn" type="button" disabled={analyze_busy} onclick={on_analyze}>
                { "1. Analyze Image" }
            </button>
            { status_line("analysis-status", studio.status(Channel::Analyze)) }
            { analysis_section(studio, core, markdown_copied) }
        </div>
    }
}

fn dimension_input(
    id: &'static str,
    field: DimensionField,
    value: &str,
    placeholder: &str,
    auto: bool,
    core: &Rc<StudioCore>,
) -> Html {
    let core = core.clone();
    let oninput = Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        core.update(|studio| studio.edit_png_dimension(field, &input.value()));
    });
    html! {
        <input
            {id}
            type="number"
            min="1"
            class={classes!(auto.then_some("auto-populated"))}
            value={value.to_string()}
            placeholder={placeholder.to_string()}
            {oninput}
        />
    }
}

fn output_panel(
    studio: &Studio,
    core: &Rc<StudioCore>,
    preview_ref: &NodeRef,
    on_editor_input: Callback<InputEvent>,
    code_copied: &UseStateHandle<bool>,
) -> Html {
    let exports = studio.exports_enabled();
    let preview = studio.preview();
    let message = match preview.message() {
        Some(text) => html! {
            <p class={classes!("preview-message", preview.is_error().then_some("error"))}>{ text }</p>
        },
        None => html! {},
    };
    let backgrounds: Html = PreviewBackground::ALL
        .iter()
        .copied()
        .map(|background| {
            let core = core.clone();
            let onclick =
                Callback::from(move |_| core.update(|studio| studio.set_background(background)));
            html! {
                <button
                    type="button"
                    class={classes!("bg-btn", (studio.background() == background).then_some("active"))}
                    data-bg={background.key()}
                    {onclick}
                >
                    { background.label() }
                </button>
            }
        })
        .collect();
    let on_copy = {
        let core = core.clone();
        let code_copied = code_copied.clone();
        Callback::from(move |_| copy_code(&core, code_copied.clone()))
    };
    let on_save = {
        let core = core.clone();
        Callback::from(move |_| save_svg(&core))
    };
    let on_save_png = {
        let core = core.clone();
        let preview_ref = preview_ref.clone();
        Callback::from(move |_| save_png(core.clone(), preview_ref.cast::<Element>()))
    };
    let on_refine_prompt = {
        let core = core.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            core.update(|studio| studio.set_refine_prompt(&input.value()));
        })
    };
    let on_refine_model = {
        let core = core.clone();
        Callback::from(move |model: String| core.update(|studio| studio.set_refine_model(&model)))
    };
    let on_refine = {
        let core = core.clone();
        let preview_ref = preview_ref.clone();
        Callback::from(move |_| run_refine(core.clone(), preview_ref.cast::<Element>()))
    };
    let inputs = studio.png_inputs();
    let copied = **code_copied;
    let refine_busy = studio.busy(Channel::Refine);
    html! {
        <div id="output-section" hidden={!studio.tabs().output_visible()}>
            <textarea
                id="svg-code-editor"
                spellcheck="false"
                value={studio.editor().to_string()}
                oninput={on_editor_input}
            />
            <div class="background-selector">{ backgrounds }</div>
            <div id="svg-preview-frame" class={studio.background().class()}>
                { message }
                <div id="svg-preview" ref={preview_ref.clone()} />
            </div>
            <div class="export-actions">
                <button
                    id="copy-btn"
                    type="button"
                    class={classes!(copied.then_some("copied"))}
                    disabled={!exports || copied}
                    onclick={on_copy}
                >
                    { if copied { COPIED_LABEL } else { COPY_CODE_LABEL } }
                </button>
                <button id="save-btn" type="button" disabled={!exports} onclick={on_save}>{ "Save SVG" }</button>
                { dimension_input("png-width-input", DimensionField::Width, &inputs.width, &inputs.width_placeholder, inputs.width_auto, core) }
                { dimension_input("png-height-input", DimensionField::Height, &inputs.height, &inputs.height_placeholder, inputs.height_auto, core) }
                <button id="save-png-btn" type="button" disabled={!exports} onclick={on_save_png}>
                    { "Save PNG" }
                </button>
            </div>
            <div class="refine-section">
                <textarea
                    id="refinement-prompt"
                    placeholder="Optional refinement instructions"
                    value={studio.refine_prompt().to_string()}
                    oninput={on_refine_prompt}
                />
                { model_select("refine-model-select", REFINE_MODELS, studio.refine_model(), on_refine_model) }
                <button id="refine-btn" type="button" disabled={refine_busy} onclick={on_refine}>
                    { "Refine SVG" }
                </button>
                { status_line("refine-status", studio.status(Channel::Refine)) }
            </div>
        </div>
    }
}

fn history_panel(studio: &Studio, core: &Rc<StudioCore>) -> Html {
    if !studio.tabs().history_visible() {
        return html! {};
    }
    let rows = studio.history_rows();
    let items: Html = rows
        .into_iter()
        .map(|row| {
            let core = core.clone();
            let index = row.index;
            let onclick = Callback::from(move |_| {
                core.update(|studio| studio.load_history(index));
            });
            html! {
                <li class="history-item" {onclick}>
                    <span class="history-label">{ row.label }</span>
                    <span class="history-timestamp">{ row.timestamp }</span>
                </li>
            }
        })
        .collect();
    let on_clear = {
        let core = core.clone();
        Callback::from(move |_| {
            if confirm(CLEAR_HISTORY_QUESTION) {
                core.update(|studio| studio.clear_history());
            }
        })
    };
    html! {
        <aside id="history-section">
            <h3>{ "History" }</h3>
            <ul id="history-list">{ items }</ul>
            <button id="clear-history-btn" type="button" onclick={on_clear}>{ "Clear History" }</button>
        </aside>
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let core = props.core.clone();
    let revision = use_state(|| core.revision());
    {
        let core = core.clone();
        let revision = revision.clone();
        use_effect_with((), move |_| {
            let core_for_cb = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                revision.set(core_for_cb.revision());
            }));
            move || drop(subscription)
        });
    }
    let _ = *revision;

    let preview_ref = use_node_ref();
    let (preview_state, preview_source) =
        core.with(|studio| (studio.preview().clone(), studio.preview_source().to_string()));
    {
        let preview_ref = preview_ref.clone();
        use_effect_with((preview_state, preview_source), move |(state, source)| {
            if let Some(host) = preview_ref.cast::<Element>() {
                match state {
                    PreviewState::Rendered(_) => match svg_dom::mount_preview(&host, source) {
                        Ok(true) => {}
                        Ok(false) => gloo::console::warn!("preview markup no longer parses"),
                        Err(err) => gloo::console::error!("preview mount failed", err),
                    },
                    _ => svg_dom::clear_preview(&host),
                }
            }
            || ()
        });
    }
    {
        let analysis = core.with(|studio| studio.analysis().clone());
        use_effect_with(analysis, move |_| {
            grow_analysis_fields();
            || ()
        });
    }

    let debounce = use_mut_ref(|| None::<Timeout>);
    let on_editor_input = {
        let core = core.clone();
        Callback::from(move |event: InputEvent| {
            let editor: HtmlTextAreaElement = event.target_unchecked_into();
            core.update(|studio| studio.edit_editor(&editor.value()));
            let delay = core.config().preview_debounce_ms;
            let core = core.clone();
            *debounce.borrow_mut() = Some(Timeout::new(delay, move || {
                core.update(|studio| {
                    studio.update_preview();
                });
            }));
        })
    };
    let code_copied = use_state(|| false);
    let markdown_copied = use_state(|| false);
    let drag_over = use_state(|| false);

    core.with(|studio| {
        html! {
            <div class="studio">
                <nav class="tabs">{ tab_bar(studio, &core) }</nav>
                <main class="workspace">
                    { generator_panel(studio, &core) }
                    { extractor_panel(studio, &core, &drag_over, &markdown_copied) }
                    { output_panel(studio, &core, &preview_ref, on_editor_input, &code_copied) }
                </main>
                { history_panel(studio, &core) }
            </div>
        }
    })
}
