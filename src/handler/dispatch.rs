//! Request dispatch module
//!
//! Entry point for HTTP request processing: method gate, exact-match
//! route lookup, response building, and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::routing::{CannedReply, RouteTable};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of matching a request against the route table
///
/// Every request resolves to exactly one of these; building the wire
/// response from an outcome is a separate step.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Path found, answer with the canned reply
    Hit(&'a CannedReply),
    /// OPTIONS request, answer with the Allow/CORS preflight response
    Preflight,
    /// Method other than GET/HEAD/OPTIONS
    MethodNotAllowed,
    /// Path not in the table
    NotFound,
}

/// Match a request line against the route table
///
/// Pure function of (method, path, table); repeated calls with the same
/// input always produce the same outcome.
pub fn resolve<'a>(method: &Method, path: &str, table: &'a RouteTable) -> Resolution<'a> {
    match *method {
        Method::GET | Method::HEAD => match table.lookup(path) {
            Some(reply) => Resolution::Hit(reply),
            None => Resolution::NotFound,
        },
        Method::OPTIONS => Resolution::Preflight,
        _ => Resolution::MethodNotAllowed,
    }
}

/// Main entry point for HTTP request handling
#[allow(clippy::unused_async)] // service_fn requires a future
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_str(req.version());
    let is_head = method == Method::HEAD;
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    // Reject oversized bodies before any routing
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let (response, body_bytes) = match resolve(&method, &path, &state.routes) {
        Resolution::Hit(reply) => {
            let sent = if is_head { 0 } else { reply.body.len() };
            (
                http::build_canned_response(reply, &state.config.http.server_name, is_head),
                sent,
            )
        }
        Resolution::Preflight => (
            http::build_options_response(state.config.http.enable_cors),
            0,
        ),
        Resolution::MethodNotAllowed => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            (http::build_405_response(), "405 Method Not Allowed".len())
        }
        Resolution::NotFound => (http::build_404_response(), "404 Not Found".len()),
    };

    if state.config.logging.access_log {
        let mut entry = logger::AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            path,
        );
        entry.query = query;
        entry.http_version = http_version.to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_bytes;
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
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
                logger::log_error(&format!(
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

/// Map hyper's HTTP version to the access-log notation
fn version_str(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutesConfig;

    fn table() -> RouteTable {
        RouteTable::from_config(&RoutesConfig::default()).unwrap()
    }

    fn assert_hit(resolution: &Resolution<'_>, status: u16, body: &str) {
        match resolution {
            Resolution::Hit(reply) => {
                assert_eq!(reply.status, status);
                assert_eq!(reply.body, body);
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_get_root() {
        let table = table();
        let resolution = resolve(&Method::GET, "/", &table);
        assert_hit(&resolution, 200, r#"{"message":"Hello, World!"}"#);
    }

    #[test]
    fn test_get_health() {
        let table = table();
        let resolution = resolve(&Method::GET, "/health", &table);
        assert_hit(&resolution, 200, r#"{"status":"OK"}"#);
    }

    #[test]
    fn test_get_test_routes() {
        let table = table();
        assert_hit(
            &resolve(&Method::GET, "/test", &table),
            200,
            r#"{"message":"Tested"}"#,
        );
        assert_hit(
            &resolve(&Method::GET, "/test-again", &table),
            200,
            r#"{"message":"Tested 2"}"#,
        );
        assert_hit(
            &resolve(&Method::GET, "/extra-test", &table),
            200,
            r#"{"message":"Extra Test"}"#,
        );
        assert_hit(
            &resolve(&Method::GET, "/extra-test2", &table),
            200,
            r#"{"message":"Extra Test 2"}"#,
        );
    }

    #[test]
    fn test_unknown_path_not_found() {
        let table = table();
        assert!(matches!(
            resolve(&Method::GET, "/does-not-exist", &table),
            Resolution::NotFound
        ));
        assert!(matches!(
            resolve(&Method::GET, "/nonexistent", &table),
            Resolution::NotFound
        ));
    }

    #[test]
    fn test_head_resolves_like_get() {
        let table = table();
        assert_hit(
            &resolve(&Method::HEAD, "/health", &table),
            200,
            r#"{"status":"OK"}"#,
        );
    }

    #[test]
    fn test_post_method_not_allowed() {
        let table = table();
        assert!(matches!(
            resolve(&Method::POST, "/health", &table),
            Resolution::MethodNotAllowed
        ));
        assert!(matches!(
            resolve(&Method::DELETE, "/", &table),
            Resolution::MethodNotAllowed
        ));
    }

    #[test]
    fn test_options_preflight() {
        let table = table();
        assert!(matches!(
            resolve(&Method::OPTIONS, "/anything", &table),
            Resolution::Preflight
        ));
    }

    #[test]
    fn test_repeated_resolution_identical() {
        let table = table();
        for _ in 0..3 {
            assert_hit(
                &resolve(&Method::GET, "/test-again", &table),
                200,
                r#"{"message":"Tested 2"}"#,
            );
        }
    }
}
