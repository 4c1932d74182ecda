//! Per-request view of the current action path and its query parameters.
//!
//! Pagers read their page number from here and rebuild links from it, so that
//! every other parameter on the page survives a page change.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::{request::Parts, Uri};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    params: Vec<(String, String)>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self { path: path.into(), params }
    }

    /// Build from a request URI. A query string that fails to decode counts as no parameters.
    pub fn from_uri(uri: &Uri) -> Self {
        let params = uri
            .query()
            .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
            .unwrap_or_default();
        Self { path: uri.path().to_string(), params }
    }

    pub fn path(&self) -> &str { &self.path }

    pub fn params(&self) -> &[(String, String)] { &self.params }

    /// First value for `key`, if any.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Current parameters with `key` set to `value`.
    ///
    /// The first occurrence keeps its position, later duplicates are dropped,
    /// and a missing key is appended.
    pub fn params_with(&self, key: &str, value: &str) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.params.len() + 1);
        let mut replaced = false;
        for (k, v) in &self.params {
            if k == key {
                if !replaced {
                    out.push((k.clone(), value.to_string()));
                    replaced = true;
                }
            } else {
                out.push((k.clone(), v.clone()));
            }
        }
        if !replaced {
            out.push((key.to_string(), value.to_string()));
        }
        out
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // nest() 会裁掉前缀，链接需要基于原始 URI 生成
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri)
            .unwrap_or(&parts.uri);
        Ok(Self::from_uri(uri))
    }
}
