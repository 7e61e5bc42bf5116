//! Pure payload reshaping between the frontend schema and provider schemas.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Frontend payload → upstream request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// Forward the payload unchanged.
    PassThrough,
    /// `contents[0].parts[0].text` → `{ "inputs": text }`.
    TextInputs,
    /// `instances[0].prompt` → `{ "inputs": prompt }`.
    ImagePromptInputs,
}

impl RequestShape {
    pub fn apply(self, payload: Value) -> Result<Value, TransformError> {
        match self {
            RequestShape::PassThrough => Ok(payload),
            RequestShape::TextInputs => {
                let text = string_at(&payload, "/contents/0/parts/0/text")
                    .ok_or(TransformError::MissingField("contents[0].parts[0].text"))?;
                Ok(json!({ "inputs": text }))
            }
            RequestShape::ImagePromptInputs => {
                let prompt = string_at(&payload, "/instances/0/prompt")
                    .ok_or(TransformError::MissingField("instances[0].prompt"))?;
                Ok(json!({ "inputs": prompt }))
            }
        }
    }
}

/// Upstream success body → frontend response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Relay the upstream JSON verbatim.
    Json,
    /// `[{ "generated_text": t }]` → `candidates[0].content.parts[0].text`.
    GeneratedTextCandidates,
    /// Raw image bytes → base64 in `predictions[0].bytesBase64Encoded`.
    ImageBase64Predictions,
}

impl ResponseShape {
    pub fn apply(self, body: &[u8]) -> Result<Value, TransformError> {
        match self {
            ResponseShape::Json => Ok(serde_json::from_slice(body)?),
            ResponseShape::GeneratedTextCandidates => {
                let upstream: Value = serde_json::from_slice(body)?;
                let text = string_at(&upstream, "/0/generated_text")
                    .ok_or(TransformError::MissingField("[0].generated_text"))?;
                Ok(json!({
                    "candidates": [{ "content": { "parts": [{ "text": text }] } }]
                }))
            }
            ResponseShape::ImageBase64Predictions => Ok(json!({
                "predictions": [{ "bytesBase64Encoded": STANDARD.encode(body) }]
            })),
        }
    }
}

fn string_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}
