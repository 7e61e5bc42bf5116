//! Hugging Face hosted inference.
//!
//! Models take a flat `{ "inputs": ... }` body and authenticate with a bearer
//! token. Requests are cut down from the Google-shaped payloads the frontend
//! sends, and responses are wrapped back into the Google envelopes it reads.

use super::{CredentialPlacement, RequestShape, ResponseShape, Route};

pub const BASE_URL: &str = "https://api-inference.huggingface.co/models";

pub const CREDENTIAL_ENV: &str = "HF_TOKEN";

pub static ROUTES: &[Route] = &[
    Route {
        endpoint: "text",
        path: "mistralai/Mistral-7B-Instruct-v0.2",
        credential: CredentialPlacement::BearerHeader,
        request: RequestShape::TextInputs,
        response: ResponseShape::GeneratedTextCandidates,
    },
    Route {
        endpoint: "image",
        path: "stabilityai/stable-diffusion-xl-base-1.0",
        credential: CredentialPlacement::BearerHeader,
        request: RequestShape::ImagePromptInputs,
        response: ResponseShape::ImageBase64Predictions,
    },
];
