use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";
const API_KEY_ENV: &str = "TOKENVAULT_API_KEY";

/// Process-wide credential gate.
///
/// Holds the single API key loaded at startup; comparison is exact string
/// equality with no normalization. An unset key refuses every request.
#[derive(Clone, Default)]
pub struct Authorizer {
    api_key: Option<String>,
}

impl Authorizer {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|value| !value.is_empty());
        if api_key.is_none() {
            warn!("{API_KEY_ENV} is not set; every request will be refused");
        }
        Self { api_key }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    pub fn authorize(&self, supplied: Option<&str>) -> Result<(), AppError> {
        match (&self.api_key, supplied) {
            (Some(expected), Some(given)) if expected == given => Ok(()),
            (Some(_), Some(_)) => Err(AppError::unauthorized("invalid api key")),
            (Some(_), None) => Err(AppError::unauthorized("missing api key")),
            (None, _) => Err(AppError::unauthorized("api key is not configured")),
        }
    }
}

pub async fn http_layer(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let supplied = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.authorizer.authorize(supplied) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_passes() {
        let authorizer = Authorizer::new(Some("sekrit".into()));
        assert!(authorizer.authorize(Some("sekrit")).is_ok());
    }

    #[test]
    fn mismatch_and_missing_are_refused() {
        let authorizer = Authorizer::new(Some("sekrit".into()));
        assert!(authorizer.authorize(Some("Sekrit")).is_err());
        assert!(authorizer.authorize(Some("sekrit ")).is_err());
        assert!(authorizer.authorize(None).is_err());
    }

    #[test]
    fn unset_key_refuses_everything() {
        let authorizer = Authorizer::new(None);
        assert!(authorizer.authorize(Some("anything")).is_err());
        assert!(authorizer.authorize(None).is_err());
    }

    #[test]
    fn empty_key_counts_as_unset() {
        let authorizer = Authorizer::new(Some(String::new()));
        assert!(authorizer.authorize(Some("")).is_err());
    }
}
