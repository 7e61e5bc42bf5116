//! Upstream provider tables.
//!
//! Each provider family is a static list of [`Route`]s keyed by the logical
//! endpoint name the frontend sends. Adding or removing an upstream model is
//! an edit to one of these tables; the relay itself never branches on the
//! endpoint name.

pub mod gemini;
pub mod hugging_face;
pub mod shape;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

pub use shape::{RequestShape, ResponseShape, TransformError};

/// Provider family served by a deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    HuggingFace,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::HuggingFace => "hugging_face",
        }
    }

    /// Human-readable upstream name used in error envelopes.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Google",
            ProviderKind::HuggingFace => "Hugging Face",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::BASE_URL,
            ProviderKind::HuggingFace => hugging_face::BASE_URL,
        }
    }

    pub fn default_credential_env(self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::CREDENTIAL_ENV,
            ProviderKind::HuggingFace => hugging_face::CREDENTIAL_ENV,
        }
    }

    pub fn routes(self) -> &'static [Route] {
        match self {
            ProviderKind::Gemini => gemini::ROUTES,
            ProviderKind::HuggingFace => hugging_face::ROUTES,
        }
    }
}

/// Where the credential travels on the upstream request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPlacement {
    /// Appended to the URL as `?<name>=<credential>`.
    QueryParam(&'static str),
    /// Sent as `Authorization: Bearer <credential>`.
    BearerHeader,
}

/// One logical endpoint and everything needed to reach its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub endpoint: &'static str,
    /// Path relative to the provider base URL.
    pub path: &'static str,
    pub credential: CredentialPlacement,
    pub request: RequestShape,
    pub response: ResponseShape,
}

/// Resolved provider table for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ProviderTable {
    kind: ProviderKind,
    base_url: String,
    routes: &'static [Route],
}

impl ProviderTable {
    pub fn new(kind: ProviderKind, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| kind.default_base_url())
            .trim_end_matches('/')
            .to_string();

        Self {
            kind,
            base_url,
            routes: kind.routes(),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &'static str> {
        let routes: &'static [Route] = self.routes;
        routes.iter().map(|route| route.endpoint)
    }

    pub fn resolve(&self, endpoint: &str) -> Option<&'static Route> {
        let routes: &'static [Route] = self.routes;
        routes.iter().find(|route| route.endpoint == endpoint)
    }

    /// Full upstream URL for `route`, carrying the credential when the route
    /// expects it in the query string.
    pub fn upstream_url(
        &self,
        route: &Route,
        credential: &SecretString,
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, route.path))?;
        if let CredentialPlacement::QueryParam(name) = route.credential {
            url.query_pairs_mut()
                .append_pair(name, credential.expose_secret());
        }
        Ok(url)
    }
}
