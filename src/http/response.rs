//! Responses produced by the gateway itself.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::redirect::RedirectAction;

/// Turn a redirect action into a response.
///
/// `None` when the action cannot be issued (empty or unrepresentable
/// location, invalid status); the caller keeps its not-found response.
pub fn redirect_response(action: &RedirectAction) -> Option<Response> {
    if action.url.is_empty() {
        return None;
    }
    let status = StatusCode::from_u16(action.status_code).ok()?;
    let location = HeaderValue::from_bytes(action.url.as_bytes()).ok()?;

    Response::builder()
        .status(status)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .ok()
}

/// JSON list of plugin identifiers, or 404 when the site has no override.
pub fn plugin_list_response(plugins: Option<Vec<String>>) -> Response {
    match plugins {
        Some(list) => Json(list).into_response(),
        None => (StatusCode::NOT_FOUND, "No plugin override for this site").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_response() {
        let response = redirect_response(&RedirectAction {
            url: "/new-page".into(),
            status_code: 301,
        })
        .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/new-page");
    }

    #[test]
    fn test_empty_location_is_not_issued() {
        assert!(redirect_response(&RedirectAction { url: String::new(), status_code: 301 }).is_none());
    }

    #[test]
    fn test_plugin_list_response_status() {
        assert_eq!(plugin_list_response(Some(vec![])).status(), StatusCode::OK);
        assert_eq!(plugin_list_response(None).status(), StatusCode::NOT_FOUND);
    }
}
