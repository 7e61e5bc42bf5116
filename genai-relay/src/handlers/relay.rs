use crate::error::RelayError;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::Method, Json};
use serde_json::Value;

/// Single relay endpoint. Mounted for every method so that the relay itself
/// answers wrong verbs with its JSON 405 body.
pub async fn relay(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    state.relay.handle(&method, &body).await.map(Json)
}
