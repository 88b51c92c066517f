//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: dispatches the two API proxy
//! paths, guards method and body size for static paths, and emits the
//! access log entry once the response is built.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::proxy;

use super::static_files;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let response = route_request(&req, &method, &path, query.as_deref(), &state).await;

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version: http_version.to_string(),
            status: response.status().as_u16(),
            body_bytes: content_length(&response),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path
async fn route_request(
    req: &Request<hyper::body::Incoming>,
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // 1. API proxy endpoints
    if let Some(collection) = collection_for_path(path) {
        return proxy::relay_collection(method, query, collection, state).await;
    }

    // 2. Static paths: method guard, then body size guard
    if let Some(resp) = check_http_method(method) {
        return resp;
    }
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Static file serving
    let is_head = *method == Method::HEAD;
    static_files::serve(
        &state.config.site,
        path,
        is_head,
        &state.config.http.server_name,
    )
    .await
}

/// The two proxied CMS collections, by request path
fn collection_for_path(path: &str) -> Option<&'static str> {
    match path {
        "/api/news" => Some("news"),
        "/api/topics" => Some("topics"),
        _ => None,
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Body size as reported by the Content-Length response header.
/// Error responses without the header log as zero bytes.
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_label(version: hyper::Version) -> &'static str {
    if version == hyper::Version::HTTP_2 {
        "2"
    } else if version == hyper::Version::HTTP_10 {
        "1.0"
    } else {
        "1.1"
    }
}
