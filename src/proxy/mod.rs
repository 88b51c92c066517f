//! CMS proxy endpoint
//!
//! One parameterized handler backs both `/api/news` and `/api/topics`:
//! validate the inbound method, relay the listing request upstream, and map
//! the outcome onto an HTTP response. The upstream payload is forwarded
//! untouched. Upstream failures are logged server-side with their real
//! cause and never leak into the response body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::config::AppState;
use crate::http;
use crate::logger;

/// Result limit applied when the query string does not carry one
const DEFAULT_LIMIT: u32 = 5;

/// Relay a listing request for `collection` to the CMS.
///
/// Stateless per request; three branches:
/// preflight, method guard, fetch-and-relay.
pub async fn relay_collection(
    method: &Method,
    query: Option<&str>,
    collection: &str,
    state: &AppState,
) -> Response<Full<Bytes>> {
    // Preflight never reaches the upstream
    if method == Method::OPTIONS {
        return http::build_preflight_response();
    }

    if method != Method::GET {
        logger::log_warning(&format!(
            "Method not allowed on /api/{collection}: {method}"
        ));
        return http::build_method_not_allowed_response();
    }

    let limit = parse_limit(query);

    let Some(client) = state.cms.as_ref() else {
        logger::log_error("MICROCMS_API_KEY is not set");
        return http::build_configuration_error_response();
    };

    match client.fetch_list(collection, limit).await {
        Ok(body) => http::build_api_json_response(body),
        Err(e) => {
            logger::log_error(&format!("Failed to fetch {collection} from CMS: {e}"));
            http::build_fetch_failure_response(collection)
        }
    }
}

/// Extract the numeric `limit` parameter from a query string.
///
/// Absent or unparsable values fall back to the default.
fn parse_limit(query: Option<&str>) -> u32 {
    query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .find_map(|pair| pair.strip_prefix("limit="))
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::CmsClient;
    use crate::config::{
        CmsConfig, Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SiteConfig,
    };
    use http_body_util::BodyExt;
    use mockito::{Matcher, Server};

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                show_headers: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "test".to_string(),
                max_body_size: 1024,
            },
            site: SiteConfig {
                root: ".".to_string(),
                index_file: "index.html".to_string(),
            },
            cms: CmsConfig {
                service_id: "test".to_string(),
                base_url: None,
                api_key: None,
            },
        }
    }

    fn state_without_client() -> AppState {
        AppState {
            config: test_config(),
            cms: None,
        }
    }

    fn state_for(base_url: &str) -> AppState {
        AppState {
            config: test_config(),
            cms: Some(CmsClient::new(base_url, "test-key").unwrap()),
        }
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 5);
        assert_eq!(parse_limit(Some("")), 5);
        assert_eq!(parse_limit(Some("limit=2")), 2);
        assert_eq!(parse_limit(Some("draftKey=abc&limit=10")), 10);
        assert_eq!(parse_limit(Some("limit=abc")), 5);
        assert_eq!(parse_limit(Some("limit=-1")), 5);
    }

    #[tokio::test]
    async fn test_preflight_returns_empty_body_and_cors() {
        let state = state_without_client();
        let response =
            relay_collection(&Method::OPTIONS, Some("limit=2"), "news", &state).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "GET, OPTIONS"
        );
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            "Content-Type"
        );
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_non_get_methods_never_reach_upstream() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let state = state_for(&server.url());

        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let response = relay_collection(&method, None, "news", &state).await;
            assert_eq!(response.status(), 405, "method {method} must be rejected");
            assert_eq!(
                body_string(response).await,
                r#"{"error":"Method not allowed"}"#
            );
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_key_makes_zero_outbound_calls() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let state = state_without_client();

        let response = relay_collection(&Method::GET, None, "topics", &state).await;

        assert_eq!(response.status(), 500);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Server configuration error"}"#
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_success_passes_body_through_with_cache_directive() {
        let mut server = Server::new_async().await;
        let upstream_body = r#"{"contents":[{"title":"A"}]}"#;
        let _mock = server
            .mock("GET", "/api/v1/news")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(upstream_body)
            .create_async()
            .await;
        let state = state_for(&server.url());

        let response = relay_collection(&Method::GET, None, "news", &state).await;

        assert_eq!(response.status(), 200);
        assert!(response.headers()["cache-control"]
            .to_str()
            .unwrap()
            .contains("s-maxage=300"));
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(body_string(response).await, upstream_body);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_leaked() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/news")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream detail")
            .create_async()
            .await;
        let state = state_for(&server.url());

        let response = relay_collection(&Method::GET, None, "news", &state).await;

        assert_eq!(response.status(), 500);
        let body = body_string(response).await;
        assert_eq!(body, r#"{"error":"Failed to fetch news"}"#);
        assert!(!body.contains("503"));
        assert!(!body.contains("upstream detail"));
    }

    #[tokio::test]
    async fn test_limit_defaults_to_five() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/topics")
            .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let state = state_for(&server.url());

        let response = relay_collection(&Method::GET, None, "topics", &state).await;

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_explicit_limit_is_forwarded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/topics")
            .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let state = state_for(&server.url());

        let response =
            relay_collection(&Method::GET, Some("limit=2"), "topics", &state).await;

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }
}
