//! Request router/translator.
//!
//! One call walks a fixed pipeline: method gate, credential check, endpoint
//! lookup, request reshape, a single upstream POST, response reshape. Every
//! early exit is a [`RelayError`].

use crate::credentials::CredentialSource;
use crate::error::RelayError;
use crate::providers::{CredentialPlacement, ProviderTable};
use anyhow::Context;
use axum::http::Method;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::sync::Arc;

const REDACTED: &str = "[REDACTED]";

pub struct Relay {
    client: Client,
    table: ProviderTable,
    credentials: Arc<dyn CredentialSource>,
}

impl Relay {
    pub fn new(table: ProviderTable, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client: Client::new(),
            table,
            credentials,
        }
    }

    pub fn table(&self) -> &ProviderTable {
        &self.table
    }

    /// Relay one inbound call and return the body for a 200 response.
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Result<Value, RelayError> {
        if *method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        let credential = self
            .credentials
            .credential()
            .ok_or(RelayError::Configuration)?;

        // A map only deserializes from a JSON object; arrays and scalars fail here.
        let mut request: Map<String, Value> =
            serde_json::from_slice(body).context("relay request body is not a JSON object")?;
        let endpoint = request.remove("endpoint").unwrap_or_default();
        let payload = request.remove("payload").unwrap_or_default();

        let route = self
            .table
            .resolve(endpoint.as_str().unwrap_or_default())
            .ok_or_else(|| RelayError::InvalidEndpoint(endpoint.to_string()))?;

        let upstream_body = route
            .request
            .apply(payload)
            .with_context(|| format!("failed to build upstream body for '{}'", route.endpoint))?;

        let url = self
            .table
            .upstream_url(route, &credential)
            .context("failed to build upstream URL")?;

        tracing::debug!(
            provider = self.table.kind().as_str(),
            endpoint = route.endpoint,
            path = route.path,
            "Forwarding request upstream"
        );

        let mut upstream = self.client.post(url).json(&upstream_body);
        if route.credential == CredentialPlacement::BearerHeader {
            upstream = upstream.bearer_auth(credential.expose_secret());
        }

        // reqwest errors carry the request URL, which may hold the key.
        let response = upstream
            .send()
            .await
            .map_err(|e| anyhow::Error::new(e.without_url()))
            .context("upstream request failed")?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow::Error::new(e.without_url()))
            .context("failed to read upstream body")?;

        if !status.is_success() {
            let details = redact(error_details(&bytes), credential.expose_secret());
            return Err(RelayError::Upstream {
                status,
                provider: self.table.kind().label(),
                details,
            });
        }

        let reshaped = route
            .response
            .apply(&bytes)
            .with_context(|| {
                format!("failed to reshape upstream response for '{}'", route.endpoint)
            })?;

        tracing::info!(
            provider = self.table.kind().as_str(),
            endpoint = route.endpoint,
            status = status.as_u16(),
            "Relayed upstream response"
        );

        Ok(reshaped)
    }
}

/// Upstream error body as JSON when it parses, raw text otherwise.
fn error_details(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// Replace every occurrence of `secret` inside string values and object keys.
fn redact(value: Value, secret: &str) -> Value {
    if secret.is_empty() {
        return value;
    }

    match value {
        Value::String(s) if s.contains(secret) => Value::String(s.replace(secret, REDACTED)),
        Value::Array(items) => Value::Array(items.into_iter().map(|v| redact(v, secret)).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.replace(secret, REDACTED), redact(v, secret)))
                .collect(),
        ),
        other => other,
    }
}
