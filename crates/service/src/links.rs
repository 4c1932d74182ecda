//! Link generation used by pagers and redirects.

use tracing::warn;

/// Builds a URI for an action path and a set of query parameters.
pub trait LinkBuilder: Send + Sync {
    fn build(&self, path: &str, params: &[(String, String)]) -> String;
}

/// `path?k=v&...`, or just `path` when there are no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLinks;

impl LinkBuilder for QueryLinks {
    fn build(&self, path: &str, params: &[(String, String)]) -> String {
        if params.is_empty() {
            return path.to_string();
        }
        match serde_urlencoded::to_string(params) {
            Ok(query) => format!("{path}?{query}"),
            Err(e) => {
                warn!(%path, error = %e, "failed to encode query parameters; dropping them");
                path.to_string()
            }
        }
    }
}

/// Prefixes every path with a mount point, for routers nested under a sub-path.
#[derive(Debug, Clone)]
pub struct MountedLinks {
    prefix: String,
}

impl MountedLinks {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        Self { prefix }
    }
}

impl LinkBuilder for MountedLinks {
    fn build(&self, path: &str, params: &[(String, String)]) -> String {
        let full = if path.starts_with('/') {
            format!("{}{}", self.prefix, path)
        } else {
            format!("{}/{}", self.prefix, path)
        };
        QueryLinks.build(&full, params)
    }
}
