//! 303 See Other responses with a clickable fallback body.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use common::utils::html::escape;
use service::LinkBuilder;
use tracing::{debug, warn};

use crate::errors::RedirectError;

#[derive(Debug, Clone)]
pub struct SeeOther {
    target: String,
    location: HeaderValue,
}

impl SeeOther {
    pub fn new(target: impl Into<String>) -> Result<Self, RedirectError> {
        let target = target.into();
        let location = HeaderValue::from_str(&target)
            .map_err(|_| RedirectError::InvalidLocation(target.clone()))?;
        Ok(Self { target, location })
    }

    fn from_header(location: HeaderValue) -> Self {
        let target = String::from_utf8_lossy(location.as_bytes()).into_owned();
        Self { target, location }
    }

    pub fn target(&self) -> &str { &self.target }

    pub fn body(&self) -> String {
        let t = escape(&self.target);
        format!(r#"Please follow <a href="{t}">{t}</a>!"#)
    }
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        debug!(location = %self.target, "redirecting");
        let body = self.body();
        (
            StatusCode::SEE_OTHER,
            [
                (header::LOCATION, self.location),
                (header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8")),
            ],
            body,
        )
            .into_response()
    }
}

/// Redirect to the path formed by joining `parts` with `/`. Empty parts are skipped.
pub fn redirect<I, S>(parts: I) -> Result<SeeOther, RedirectError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut target = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if target.is_empty() {
            target.push_str(part);
        } else {
            target.truncate(target.trim_end_matches('/').len());
            target.push('/');
            target.push_str(part.trim_start_matches('/'));
        }
    }
    SeeOther::new(target)
}

/// Redirect to a route resolved through the same link builder pagers use.
pub fn redirect_to(
    links: &dyn LinkBuilder,
    path: &str,
    params: &[(String, String)],
) -> Result<SeeOther, RedirectError> {
    SeeOther::new(links.build(path, params))
}

/// Redirect back to the `Referer`. The header is not validated; when it is
/// missing the Location is empty.
pub fn redirect_referer(headers: &HeaderMap) -> SeeOther {
    let location = match headers.get(header::REFERER) {
        Some(v) => v.clone(),
        None => {
            warn!("redirect_referer without a Referer header");
            HeaderValue::from_static("")
        }
    };
    SeeOther::from_header(location)
}
