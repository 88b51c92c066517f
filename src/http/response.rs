//! HTTP response building module
//!
//! Provides builders for the API proxy and static file responses,
//! decoupled from specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Shared-cache directive applied to successful API responses: shared
/// caches may serve the payload for 300 seconds and revalidate in the
/// background afterwards.
const API_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate";

/// Attach the permissive CORS header trio carried by every API response
fn with_cors(builder: hyper::http::response::Builder) -> hyper::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

/// Build the CORS preflight response: 200 with no body
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(200))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("preflight", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 for API endpoints (JSON payload)
pub fn build_method_not_allowed_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(405))
        .header("Content-Type", "application/json")
        .header("Allow", "GET, OPTIONS")
        .body(Full::new(Bytes::from(r#"{"error":"Method not allowed"}"#)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(r#"{"error":"Method not allowed"}"#)))
        })
}

/// Build 500 for a missing API key
pub fn build_configuration_error_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(500))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error":"Server configuration error"}"#,
        )))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(
                r#"{"error":"Server configuration error"}"#,
            )))
        })
}

/// Build 500 for a failed upstream fetch.
///
/// The payload names the collection but never the underlying error; that
/// detail stays in the server log.
pub fn build_fetch_failure_response(collection: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": format!("Failed to fetch {collection}") }).to_string();

    with_cors(Response::builder().status(500))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(r#"{"error":"Failed to fetch"}"#)))
        })
}

/// Build 200 relaying an upstream JSON payload unchanged
pub fn build_api_json_response(body: Bytes) -> Response<Full<Bytes>> {
    let content_length = body.len();

    with_cors(Response::builder().status(200))
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Cache-Control", API_CACHE_CONTROL)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 with static file bytes and their resolved content type
pub fn build_static_file_response(
    data: &[u8],
    content_type: &str,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response for a missing static file
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("File not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("File not found")))
        })
}

/// Build 500 response for a static file read failure
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Server error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("Server error")))
        })
}

/// Build 405 Method Not Allowed response for static paths
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response for static paths
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_carries_cors_trio() {
        let resp = build_preflight_response();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
        assert_eq!(resp.headers()["access-control-allow-methods"], "GET, OPTIONS");
        assert_eq!(
            resp.headers()["access-control-allow-headers"],
            "Content-Type"
        );
    }

    #[test]
    fn test_api_json_response_sets_cache_directive() {
        let resp = build_api_json_response(Bytes::from_static(b"{}"));
        assert_eq!(resp.status(), 200);
        let cache = resp.headers()["cache-control"].to_str().unwrap();
        assert!(cache.contains("s-maxage=300"));
        assert!(cache.contains("stale-while-revalidate"));
    }

    #[test]
    fn test_method_not_allowed_is_json() {
        let resp = build_method_not_allowed_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_static_404_is_plain_text() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "text/plain");
    }
}
