use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisData;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub complexity: u8,
    #[serde(rename = "colorUsage")]
    pub color_usage: u8,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub image_data: String,
    pub context_prompt: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConvertRequest {
    pub image_data: String,
    pub analysis_data: AnalysisData,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RefineRequest {
    pub svg_code: String,
    pub refinement_prompt: String,
    pub model: String,
    pub png_data: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SvgBody {
    #[serde(default)]
    svg_code: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    Server { status: u16, message: String },
    MissingField(&'static str),
    Transport(String),
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Server { message, .. } => f.write_str(message),
            ApiError::MissingField(field) => write!(f, "Response did not include {field}"),
            ApiError::Transport(detail) => write!(f, "Network error: {detail}"),
            ApiError::Decode(detail) => write!(f, "Unexpected response: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn generic_status_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

/// Error for a non-2xx response. Prefers the JSON `error` field and falls
/// back to a status-keyed message for non-JSON bodies.
pub fn error_from_response(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| generic_status_message(status));
    ApiError::Server { status, message }
}

/// Reads `svg_code` out of a 2xx body.
pub fn parse_svg_response(body: &str) -> Result<String, ApiError> {
    let parsed: SvgBody =
        serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    parsed.svg_code.ok_or(ApiError::MissingField("svg_code"))
}

/// Flat key → text mapping returned by the analysis endpoint. Non-string
/// values are dropped.
pub fn parse_analysis_response(body: &str) -> Result<BTreeMap<String, String>, ApiError> {
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(parsed
        .into_iter()
        .filter_map(|(key, value)| value.as_str().map(|text| (key, text.to_string())))
        .collect())
}

/// Shared tail of every call: status + body text in, parsed payload out.
pub fn interpret<T>(
    status: u16,
    body: &str,
    parse: impl FnOnce(&str) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        parse(body)
    } else {
        Err(error_from_response(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_uses_wire_names() {
        let request = GenerateRequest {
            prompt: "a red circle".into(),
            complexity: 3,
            color_usage: 2,
            model: "m1".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["colorUsage"], 2);
        assert!(value.get("color_usage").is_none());
    }

    #[test]
    fn error_body_without_error_field_uses_status() {
        let err = error_from_response(502, r#"{"detail":"x"}"#);
        assert_eq!(err.to_string(), "Request failed with status 502");
    }
}
