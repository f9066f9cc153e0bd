mod common;

use std::collections::BTreeMap;

use common::{harness, harness_with};
use svg_studio_core::api::{error_from_response, interpret, parse_analysis_response, parse_svg_response};
use svg_studio_core::config::BACKGROUND_STORAGE_KEY;
use svg_studio_core::{
    AnalysisKey, ApiError, CallError, CallPhase, Channel, GuardError, KeyValueStore, MemoryStore,
    PreviewBackground, PreviewState, RasterError, Tab, Tone,
};

const CIRCLE: &str = r#"<svg width="100" height="50"><circle r="4"/></svg>"#;

fn analysis_body() -> BTreeMap<String, String> {
    AnalysisKey::ALL
        .into_iter()
        .map(|key| (key.key().to_string(), format!("  {} text  ", key.key())))
        .collect()
}

#[test]
fn generate_success_updates_editor_preview_and_history() {
    let mut h = harness();
    h.studio.set_prompt("a red circle");
    h.studio.click_complexity(3);
    h.studio.click_color_usage(2);
    h.studio.set_generator_model("m1");

    let request = h.studio.begin_generate().expect("guard passes");
    assert_eq!(request.prompt, "a red circle");
    assert_eq!((request.complexity, request.color_usage), (3, 2));
    assert_eq!(request.model, "m1");
    assert!(h.studio.busy(Channel::Generate));
    assert_eq!(h.studio.editor(), "");

    let outcome = interpret(200, r#"{"svg_code":"<svg>...</svg>"}"#, parse_svg_response);
    h.studio.finish_generate(&request, outcome.map_err(CallError::from));

    assert_eq!(h.studio.editor(), "<svg>...</svg>");
    assert!(matches!(h.studio.preview(), PreviewState::Rendered(_)));
    assert!(h.studio.exports_enabled());
    assert!(!h.studio.busy(Channel::Generate));
    let status = h.studio.status(Channel::Generate);
    assert_eq!(status.text(), "SVG generated successfully!");
    assert_eq!(status.tone(), Some(Tone::Success));

    let entries = h.studio.history_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].version, 1);
    assert_eq!(entries[0].prompt, "a red circle");
    assert_eq!(entries[0].svg_code, "<svg>...</svg>");
}

#[test]
fn generate_server_error_reports_message_and_clears_output() {
    let mut h = harness();
    h.studio.edit_editor(CIRCLE);
    h.studio.update_preview();
    h.studio.set_prompt("a red circle");

    let request = h.studio.begin_generate().expect("guard passes");
    let outcome = interpret(500, r#"{"error":"rate limited"}"#, parse_svg_response);
    h.studio.finish_generate(&request, outcome.map_err(CallError::from));

    let status = h.studio.status(Channel::Generate);
    assert_eq!(status.text(), "Generation failed: rate limited");
    assert_eq!(status.tone(), Some(Tone::Error));
    assert_eq!(h.studio.editor(), "");
    assert_eq!(h.studio.preview(), &PreviewState::Placeholder);
    assert!(h.studio.history_entries().is_empty());
}

#[test]
fn non_json_error_body_falls_back_to_status() {
    let err = error_from_response(503, "<html>Service Unavailable</html>");
    assert_eq!(
        err,
        ApiError::Server {
            status: 503,
            message: "Request failed with status 503".to_string(),
        }
    );
}

#[test]
fn success_without_svg_code_is_a_failure() {
    let mut h = harness();
    h.studio.set_prompt("x");
    let request = h.studio.begin_generate().expect("guard passes");
    let outcome = interpret(200, r#"{"other":"value"}"#, parse_svg_response);
    h.studio.finish_generate(&request, outcome.map_err(CallError::from));
    assert_eq!(
        h.studio.status(Channel::Generate).text(),
        "Generation failed: Response did not include svg_code"
    );
    assert!(h.studio.history_entries().is_empty());
}

#[test]
fn blank_prompt_fails_before_any_request() {
    let mut h = harness();
    h.studio.set_prompt("   ");
    let err = h.studio.begin_generate().expect_err("blank prompt rejected");
    assert_eq!(err, GuardError::EmptyPrompt);
    let status = h.studio.status(Channel::Generate);
    assert_eq!(status.phase(), &CallPhase::Failed("Please enter a prompt.".into()));
    assert!(!h.studio.busy(Channel::Generate));
}

#[test]
fn success_status_auto_clears_but_errors_persist() {
    let mut h = harness();
    h.studio.set_prompt("x");
    let request = h.studio.begin_generate().expect("guard passes");
    let generation = h.studio.finish_generate(&request, Ok(CIRCLE.to_string()));
    assert!(h.studio.expire_status(Channel::Generate, generation));
    assert_eq!(h.studio.status(Channel::Generate).phase(), &CallPhase::Idle);

    let request = h.studio.begin_generate().expect("guard passes");
    let generation = h.studio.finish_generate(
        &request,
        Err(CallError::Api(ApiError::Transport("offline".into()))),
    );
    assert!(!h.studio.expire_status(Channel::Generate, generation));
    assert_eq!(
        h.studio.status(Channel::Generate).text(),
        "Generation failed: Network error: offline"
    );
}

#[test]
fn load_history_round_trips_preview_state() {
    let mut h = harness();
    h.studio.set_prompt("wide");
    h.studio.click_complexity(5);
    h.studio.click_color_usage(1);
    let request = h.studio.begin_generate().expect("guard passes");
    h.studio.finish_generate(&request, Ok(CIRCLE.to_string()));
    let stored_preview = h.studio.preview().clone();

    h.studio.set_prompt("something else");
    h.studio.click_complexity(2);
    h.studio.edit_editor("not svg");
    h.studio.update_preview();
    h.studio.switch_tab(Tab::Extractor.id());

    assert!(h.studio.load_history(0));
    assert_eq!(h.studio.prompt(), "wide");
    assert_eq!(h.studio.complexity().selected(), Some(5));
    assert_eq!(h.studio.color_usage().selected(), Some(1));
    assert_eq!(h.studio.editor(), CIRCLE);
    assert_eq!(h.studio.preview(), &stored_preview);
    assert_eq!(h.studio.tabs().active(), Some(Tab::Generator));

    assert!(!h.studio.load_history(7));
}

#[test]
fn analyze_requires_image() {
    let mut h = harness();
    let err = h.studio.begin_analyze().expect_err("no image");
    assert_eq!(err, GuardError::MissingImage);
    assert_eq!(
        h.studio.status(Channel::Analyze).text(),
        "Please upload an image first."
    );
    assert!(!h.studio.analysis().visible());
}

#[test]
fn analyze_fills_known_keys_and_ignores_others() {
    let mut h = harness();
    h.studio.load_image("cat.png", "data:image/png;base64,AAAA");
    h.studio.set_analysis_prompt("  logo  ");
    let request = h.studio.begin_analyze().expect("image present");
    assert_eq!(request.image_data, "data:image/png;base64,AAAA");
    assert_eq!(request.context_prompt, "logo");

    let panel = h.studio.analysis();
    assert!(panel.visible());
    assert!(!panel.recreate_enabled());
    for (_, field) in panel.fields() {
        assert!(!field.enabled);
        assert_eq!(field.placeholder, "Analyzing...");
    }

    let body = r#"{"metadata":" meta ","layout":"grid","bogus":"ignored","ocr":7}"#;
    let sections = interpret(200, body, parse_analysis_response).expect("parsed");
    h.studio.finish_analyze(Ok(sections));

    let panel = h.studio.analysis();
    let metadata = panel.field(AnalysisKey::Metadata).expect("metadata field");
    assert_eq!(metadata.value, "meta");
    assert!(metadata.enabled);
    let semantic = panel.field(AnalysisKey::Semantic).expect("semantic field");
    assert!(!semantic.enabled);
    assert!(!panel.field(AnalysisKey::Ocr).expect("ocr field").enabled);
    assert!(panel.recreate_enabled());
    assert_eq!(h.studio.status(Channel::Analyze).text(), "Analysis complete!");
}

#[test]
fn analyze_failure_marks_every_field() {
    let mut h = harness();
    h.studio.load_image("cat.png", "data:image/png;base64,AAAA");
    h.studio.begin_analyze().expect("image present");
    let outcome = interpret(500, r#"{"error":"quota"}"#, parse_analysis_response);
    h.studio.finish_analyze(outcome.map_err(CallError::from));

    let panel = h.studio.analysis();
    for (_, field) in panel.fields() {
        assert_eq!(field.value, "Error: quota");
        assert!(field.error);
        assert!(!field.enabled);
    }
    assert!(!panel.recreate_enabled());
    assert!(!panel.copy_enabled());
    assert_eq!(h.studio.status(Channel::Analyze).text(), "Analysis failed: quota");
}

#[test]
fn recreate_guards_then_writes_shared_editor() {
    let mut h = harness();
    assert_eq!(
        h.studio.begin_recreate().expect_err("no image"),
        GuardError::MissingImageData
    );

    h.studio.load_image("cat.png", "data:image/png;base64,AAAA");
    h.studio.begin_analyze().expect("image present");
    let mut partial = analysis_body();
    partial.remove("ocr");
    h.studio.finish_analyze(Ok(partial));
    let err = h.studio.begin_recreate().expect_err("ocr missing");
    assert!(matches!(err, GuardError::IncompleteAnalysis(ref missing) if missing.missing == vec![AnalysisKey::Ocr]));
    assert_eq!(
        h.studio.status(Channel::Recreate).text(),
        "Error gathering analysis data."
    );

    h.studio.begin_analyze().expect("image present");
    h.studio.finish_analyze(Ok(analysis_body()));
    assert!(h.studio.edit_analysis(AnalysisKey::Layout, "edited layout"));
    let request = h.studio.begin_recreate().expect("complete analysis");
    assert_eq!(request.analysis_data.layout, "edited layout");
    assert_eq!(request.analysis_data.ocr, "ocr text");

    h.studio.finish_recreate(Ok(CIRCLE.to_string()));
    assert_eq!(h.studio.editor(), CIRCLE);
    assert!(h.studio.exports_enabled());
    assert!(h.studio.history_entries().is_empty());
    assert_eq!(h.studio.status(Channel::Recreate).text(), "Recreation successful!");
}

#[test]
fn recreate_failure_keeps_editor() {
    let mut h = harness();
    h.studio.edit_editor(CIRCLE);
    h.studio.update_preview();
    h.studio.load_image("cat.png", "data:image/png;base64,AAAA");
    h.studio.begin_analyze().expect("image present");
    h.studio.finish_analyze(Ok(analysis_body()));
    h.studio.begin_recreate().expect("complete analysis");
    h.studio.finish_recreate(Err(CallError::Api(ApiError::Server {
        status: 500,
        message: "model down".into(),
    })));
    assert_eq!(h.studio.editor(), CIRCLE);
    assert_eq!(
        h.studio.status(Channel::Recreate).text(),
        "Recreation failed: model down"
    );
}

#[test]
fn new_image_hides_previous_analysis() {
    let mut h = harness();
    h.studio.load_image("a.png", "data:a");
    h.studio.begin_analyze().expect("image present");
    h.studio.finish_analyze(Ok(analysis_body()));
    assert!(h.studio.analysis().visible());
    h.studio.load_image("b.png", "data:b");
    assert!(!h.studio.analysis().visible());
    assert_eq!(h.studio.status(Channel::Analyze).phase(), &CallPhase::Idle);
    assert_eq!(h.studio.file_label(), "b.png");

    h.studio.reject_image();
    assert!(h.studio.image().is_none());
    assert_eq!(h.studio.file_label(), "Invalid file type chosen");
}

#[test]
fn refine_flow_records_refined_history() {
    let mut h = harness();
    h.studio.set_prompt("logo");
    h.studio.click_complexity(4);
    h.studio.click_color_usage(5);
    h.studio.set_refine_model("r1");

    assert_eq!(h.studio.begin_refine().expect_err("empty editor"), GuardError::EmptySvg);

    h.studio.edit_editor(&format!("  {CIRCLE}  "));
    h.studio.update_preview();
    h.studio.set_refine_prompt("make the circle much bigger please");
    let draft = h.studio.begin_refine().expect("svg present");
    assert_eq!(draft.svg_code, CIRCLE);
    assert_eq!(
        h.studio.status(Channel::Refine).text(),
        "Generating preview PNG..."
    );

    let request = h.studio.refine_request(&draft, "data:image/png;base64,PNG".into());
    assert_eq!(request.png_data, "data:image/png;base64,PNG");
    assert_eq!(
        h.studio.status(Channel::Refine).text(),
        "Refining SVG with analysis..."
    );

    h.studio.finish_refine(&draft, Ok("<svg><rect/></svg>".into()));
    assert_eq!(h.studio.refine_prompt(), "");
    assert_eq!(h.studio.editor(), "<svg><rect/></svg>");
    let entries = h.studio.history_entries();
    assert_eq!(entries[0].prompt, "logo (Refined: make the circle much...)");
    assert_eq!((entries[0].complexity, entries[0].color_usage), (4, 5));
    assert_eq!(entries[0].model, "r1");
}

#[test]
fn refine_without_instructions_is_auto() {
    let mut h = harness();
    h.studio.set_prompt("logo");
    h.studio.edit_editor(CIRCLE);
    let draft = h.studio.begin_refine().expect("svg present");
    h.studio.finish_refine(&draft, Ok(CIRCLE.into()));
    assert_eq!(h.studio.history_entries()[0].prompt, "logo (Refined - Auto)");
}

#[test]
fn refine_raster_failure_leaves_editor() {
    let mut h = harness();
    h.studio.edit_editor(CIRCLE);
    h.studio.set_refine_prompt("keep me");
    let draft = h.studio.begin_refine().expect("svg present");
    h.studio.finish_refine(&draft, Err(RasterError::NoSvg.into()));
    assert_eq!(h.studio.editor(), CIRCLE);
    assert_eq!(h.studio.refine_prompt(), "keep me");
    assert_eq!(
        h.studio.status(Channel::Refine).text(),
        "Refinement failed: No SVG in preview to generate PNG."
    );
    assert!(h.studio.history_entries().is_empty());
}

#[test]
fn background_preference_persists_and_restores() {
    let prefs = MemoryStore::new();
    let mut h = harness_with(MemoryStore::new(), prefs.clone());
    assert_eq!(h.studio.background(), PreviewBackground::Transparent);
    h.studio.set_background(PreviewBackground::Black);
    assert_eq!(prefs.get(BACKGROUND_STORAGE_KEY).as_deref(), Some("black"));

    let restored = harness_with(MemoryStore::new(), prefs.clone());
    assert_eq!(restored.studio.background(), PreviewBackground::Black);

    prefs.set(BACKGROUND_STORAGE_KEY, "plaid");
    let fallback = harness_with(MemoryStore::new(), prefs);
    assert_eq!(fallback.studio.background(), PreviewBackground::Transparent);
}

#[test]
fn history_is_shared_through_the_session_store() {
    let session = MemoryStore::new();
    let mut first = harness_with(session.clone(), MemoryStore::new());
    first.studio.set_prompt("shared");
    let request = first.studio.begin_generate().expect("guard passes");
    first.studio.finish_generate(&request, Ok(CIRCLE.into()));

    let second = harness_with(session, MemoryStore::new());
    let rows = second.studio.history_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp, "t1");
    assert_eq!(first.ticks.get(), 1);
}
