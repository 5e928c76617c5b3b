use std::collections::HashSet;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Static keys accepted on guarded routes. An empty set accepts any non-empty key.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: HashSet<String>,
}

impl ApiKeys {
    pub fn new<I: IntoIterator<Item = String>>(keys: I) -> Self {
        Self { keys: keys.into_iter().filter(|k| !k.trim().is_empty()).collect() }
    }

    pub fn accepts(&self, key: &str) -> bool {
        if key.trim().is_empty() {
            return false;
        }
        self.keys.is_empty() || self.keys.contains(key)
    }
}

/// Middleware: require a valid `X-API-Key` header.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, JsonApiError> {
    let key = req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()).map(str::to_owned);
    match key {
        Some(k) if state.api_keys.accepts(&k) => Ok(next.run(req).await),
        Some(_) => {
            warn!(path = %req.uri().path(), "rejected invalid api key");
            Err(JsonApiError::unauthorized("invalid API key"))
        }
        None => Err(JsonApiError::unauthorized("missing X-API-Key header")),
    }
}
