//! Google Generative Language API (Gemini text, Imagen, text-to-speech).
//!
//! The frontend already speaks the Google request/response schema, so every
//! route forwards the payload untouched and relays the JSON answer verbatim.
//! The API key travels as the `key` query parameter.

use super::{CredentialPlacement, RequestShape, ResponseShape, Route};

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const CREDENTIAL_ENV: &str = "GEMINI_API_KEY";

const KEY_PARAM: CredentialPlacement = CredentialPlacement::QueryParam("key");

pub static ROUTES: &[Route] = &[
    Route {
        endpoint: "text",
        path: "models/gemini-1.5-flash-latest:generateContent",
        credential: KEY_PARAM,
        request: RequestShape::PassThrough,
        response: ResponseShape::Json,
    },
    Route {
        endpoint: "image",
        path: "models/imagen-3.0-generate-002:predict",
        credential: KEY_PARAM,
        request: RequestShape::PassThrough,
        response: ResponseShape::Json,
    },
    Route {
        endpoint: "tts",
        path: "models/text-to-speech:synthesizeText",
        credential: KEY_PARAM,
        request: RequestShape::PassThrough,
        response: ResponseShape::Json,
    },
];
