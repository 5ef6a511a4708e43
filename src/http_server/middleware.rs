//! Request pre-processing
//!
//! Runs ahead of route dispatch, in this order:
//! 1. Paths without a trailing slash are redirected (301) to the same path plus `/`
//! 2. PUT and PATCH must carry a JSON Content-Type (400 when missing, 415 otherwise)

use axum::{
    extract::Request,
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::errors::{ApiError, ApiResult};

/// Accepted media type for write bodies; parameters such as charset are ignored
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Redirect requests whose path does not end in `/`.
///
/// This is a redirect, not a rewrite: the client must repeat the request
/// against the canonical path. The query string is carried over.
pub async fn redirect_to_slash(request: Request, next: Next) -> Response {
    let uri = request.uri();
    if !uri.path().ends_with('/') {
        let location = match uri.query() {
            Some(query) => format!("{}/?{}", uri.path(), query),
            None => format!("{}/", uri.path()),
        };
        debug!(from = %uri.path(), to = %location, "redirecting to canonical path");
        return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
    }

    next.run(request).await
}

/// Reject PUT and PATCH requests that do not declare a JSON body.
pub async fn require_json(request: Request, next: Next) -> ApiResult<Response> {
    let method = request.method();
    if method == Method::PUT || method == Method::PATCH {
        if let Err(e) = check_content_type(request.headers()) {
            warn!(%method, reason = %e, "rejected write request");
            return Err(e);
        }
    }

    Ok(next.run(request).await)
}

fn check_content_type(headers: &HeaderMap) -> ApiResult<()> {
    let value = headers
        .get(header::CONTENT_TYPE)
        .ok_or(ApiError::MissingContentType)?;

    let content_type = String::from_utf8_lossy(value.as_bytes());
    if !content_type.starts_with(JSON_CONTENT_TYPE) {
        return Err(ApiError::UnsupportedMediaType(content_type.into_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types_accepted() {
        assert!(check_content_type(&headers("application/json")).is_ok());
        assert!(check_content_type(&headers("application/json; charset=utf-8")).is_ok());
    }

    #[test]
    fn test_missing_content_type() {
        assert!(matches!(
            check_content_type(&HeaderMap::new()),
            Err(ApiError::MissingContentType)
        ));
    }

    #[test]
    fn test_other_content_types_unsupported() {
        for content_type in ["application/x-www-form-urlencoded", "text/plain", "text/json"] {
            assert!(matches!(
                check_content_type(&headers(content_type)),
                Err(ApiError::UnsupportedMediaType(_))
            ));
        }
    }
}
