//! Per-request classification.

use axum::http::{HeaderMap, Method};

use crate::config::schema::RequestConfig;

/// What the gateway knows about a request once the upstream has answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub not_found: bool,
    pub main_request: bool,
    pub admin: bool,
    pub suppress_filters: bool,
}

impl RequestContext {
    /// Classify a request from its method, path and headers.
    pub fn classify(
        config: &RequestConfig,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
        not_found: bool,
    ) -> Self {
        let suppress_filters = headers
            .get(config.suppress_filters_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"))
            .unwrap_or(false);

        Self {
            not_found,
            main_request: *method == Method::GET || *method == Method::HEAD,
            admin: config.admin_prefixes.iter().any(|p| in_area(path, p)),
            suppress_filters,
        }
    }

    /// Whether the not-found hooks run for this request.
    pub fn should_redirect(&self) -> bool {
        self.not_found && self.main_request && !self.admin && !self.suppress_filters
    }
}

/// `path` is `prefix` itself or lies below it.
fn in_area(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn classify(method: Method, path: &str, headers: &HeaderMap) -> RequestContext {
        RequestContext::classify(&RequestConfig::default(), &method, path, headers, true)
    }

    #[test]
    fn test_plain_not_found_get_redirects() {
        assert!(classify(Method::GET, "/old", &HeaderMap::new()).should_redirect());
        assert!(classify(Method::HEAD, "/old", &HeaderMap::new()).should_redirect());
    }

    #[test]
    fn test_non_main_requests_are_skipped() {
        assert!(!classify(Method::POST, "/old", &HeaderMap::new()).should_redirect());
    }

    #[test]
    fn test_admin_area_is_skipped() {
        assert!(!classify(Method::GET, "/wp-admin/edit.php", &HeaderMap::new()).should_redirect());
        assert!(!classify(Method::GET, "/wp-admin", &HeaderMap::new()).should_redirect());
    }

    #[test]
    fn test_admin_prefix_needs_segment_boundary() {
        assert!(classify(Method::GET, "/wp-administrator-guide", &HeaderMap::new()).should_redirect());

        let config = RequestConfig {
            admin_prefixes: vec!["/manage/".into()],
            ..RequestConfig::default()
        };
        let ctx = RequestContext::classify(&config, &Method::GET, "/manage/users", &HeaderMap::new(), true);
        assert!(ctx.admin);
    }

    #[test]
    fn test_suppress_filters_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-suppress-filters", HeaderValue::from_static("1"));
        assert!(!classify(Method::GET, "/old", &headers).should_redirect());

        headers.insert("x-suppress-filters", HeaderValue::from_static("false"));
        assert!(classify(Method::GET, "/old", &headers).should_redirect());
    }

    #[test]
    fn test_found_requests_are_skipped() {
        let ctx = RequestContext::classify(
            &RequestConfig::default(),
            &Method::GET,
            "/old",
            &HeaderMap::new(),
            false,
        );
        assert!(!ctx.should_redirect());
    }
}
