use std::collections::BTreeMap;

use serde::Serialize;
use svg_studio_core::api::{interpret, parse_analysis_response, parse_svg_response};
use svg_studio_core::config::{ANALYZE_PATH, CONVERT_PATH, GENERATE_PATH, REFINE_PATH};
use svg_studio_core::{
    AnalyzeRequest, ApiError, ConvertRequest, GenerateRequest, RefineRequest, StudioConfig,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::browser_io::js_err;

/// POSTs `body` as JSON and returns the status code and raw response text.
async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<(u16, String), ApiError> {
    let payload = serde_json::to_string(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    let transport = |err: JsValue| ApiError::Transport(js_err(err));

    let headers = Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&payload));
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("window unavailable".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(|_| ApiError::Transport("fetch did not return a Response".into()))?;
    let status = response.status();
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();
    Ok((status, text))
}

async fn call<B, T>(
    config: &StudioConfig,
    path: &str,
    body: &B,
    parse: impl FnOnce(&str) -> Result<T, ApiError>,
) -> Result<T, ApiError>
where
    B: Serialize,
{
    let url = config.endpoint(path);
    gloo::console::log!("POST", url.clone());
    let outcome = match post_json(&url, body).await {
        Ok((status, text)) => interpret(status, &text, parse),
        Err(err) => Err(err),
    };
    match &outcome {
        Ok(_) => gloo::console::log!("ok", path.to_string()),
        Err(err) => gloo::console::error!("request failed", path.to_string(), err.to_string()),
    }
    outcome
}

pub(crate) async fn generate(
    config: &StudioConfig,
    request: &GenerateRequest,
) -> Result<String, ApiError> {
    call(config, GENERATE_PATH, request, parse_svg_response).await
}

pub(crate) async fn analyze(
    config: &StudioConfig,
    request: &AnalyzeRequest,
) -> Result<BTreeMap<String, String>, ApiError> {
    call(config, ANALYZE_PATH, request, parse_analysis_response).await
}

pub(crate) async fn recreate(
    config: &StudioConfig,
    request: &ConvertRequest,
) -> Result<String, ApiError> {
    call(config, CONVERT_PATH, request, parse_svg_response).await
}

pub(crate) async fn refine(
    config: &StudioConfig,
    request: &RefineRequest,
) -> Result<String, ApiError> {
    call(config, REFINE_PATH, request, parse_svg_response).await
}
