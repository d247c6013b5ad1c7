//! Shared-secret API key guard
//!
//! Every directory route requires the `X-API-Key` header to equal the
//! configured key. A missing or wrong key answers 403.

use super::error::{map_domain_error, Problem};
use crate::contract::DirectoryError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Expected API key, passed to the middleware as state
#[derive(Clone)]
pub struct ApiKeyGuard {
    expected: Arc<str>,
}

impl ApiKeyGuard {
    pub fn new(expected: impl Into<Arc<str>>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Whether the presented key matches the configured one
    pub fn accepts(&self, presented: Option<&str>) -> bool {
        presented.is_some_and(|key| constant_time_eq(key.as_bytes(), self.expected.as_bytes()))
    }
}

impl std::fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGuard").finish_non_exhaustive()
    }
}

/// Middleware rejecting requests without the expected API key
pub async fn require_api_key(
    State(guard): State<ApiKeyGuard>,
    req: Request,
    next: Next,
) -> Result<Response, Problem> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !guard.accepts(presented) {
        let reason = if presented.is_some() {
            "Invalid API key"
        } else {
            "Missing X-API-Key header"
        };
        tracing::warn!(method = %req.method(), path = %req.uri().path(), reason, "request rejected");
        return Err(map_domain_error(DirectoryError::forbidden(reason))
            .with_instance(req.uri().path().to_string()));
    }

    Ok(next.run(req).await)
}

/// Constant-time comparison so the check does not leak a matching prefix
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_exact_key_only() {
        let guard = ApiKeyGuard::new("secret");
        assert!(guard.accepts(Some("secret")));
        assert!(!guard.accepts(Some("Secret")));
        assert!(!guard.accepts(Some("secret ")));
        assert!(!guard.accepts(Some("")));
        assert!(!guard.accepts(None));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }

    #[test]
    fn test_debug_hides_key() {
        let guard = ApiKeyGuard::new("secret");
        assert!(!format!("{guard:?}").contains("secret"));
    }
}
