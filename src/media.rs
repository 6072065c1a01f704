//! Absolute URL resolution for stored media paths.
//!
//! The store keeps relative paths; the storefront needs URLs built from the
//! requesting client's scheme and host.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::AppState;

/// Scheme, host, and media prefix of the current request. Extracted once per
/// request so response mapping stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct RequestBase {
    scheme: String,
    host: String,
    media_prefix: String,
}

impl RequestBase {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        media_prefix: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            media_prefix: media_prefix.into(),
        }
    }

    /// Absolute URL for a stored media path.
    pub fn resolve(&self, path: &str) -> String {
        let prefix = self.media_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{}://{}/{}", self.scheme, self.host, path)
        } else {
            format!("{}://{}/{}/{}", self.scheme, self.host, prefix, path)
        }
    }

    /// Resolve an optional media path. Unset (or blank) paths stay `None`;
    /// a URL is never fabricated for a missing image.
    pub fn resolve_opt(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.trim().is_empty())
            .map(|p| self.resolve(p))
    }
}

#[async_trait::async_trait]
impl FromRequestParts<AppState> for RequestBase {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http")
            .to_string();
        let host = parts
            .headers
            .get(axum::http::header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}:{}", state.config.host, state.config.port));

        Ok(RequestBase::new(scheme, host, state.config.media_url.clone()))
    }
}
