//! HTTP response building module
//!
//! Provides builders for canned replies and the various error status
//! responses, decoupled from routing logic.

use crate::routing::CannedReply;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build the response for a matched route
///
/// HEAD requests get the same status and headers with an empty body.
pub fn build_canned_response(
    reply: &CannedReply,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = reply.body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(reply.body.clone())
    };

    Response::builder()
        .status(reply.status)
        .header("Content-Type", reply.content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("canned", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
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

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
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

    fn reply() -> CannedReply {
        CannedReply {
            status: 200,
            content_type: "application/json",
            body: r#"{"status":"OK"}"#.to_string(),
        }
    }

    #[test]
    fn test_canned_response_headers() {
        let resp = build_canned_response(&reply(), "canned-server/0.1", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "15");
        assert_eq!(resp.headers().get("Server").unwrap(), "canned-server/0.1");
    }

    #[test]
    fn test_canned_response_head_keeps_length() {
        // HEAD advertises the GET body size but sends no body
        let resp = build_canned_response(&reply(), "canned-server/0.1", true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "15");
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/plain");
    }

    #[test]
    fn test_405_response_allow_header() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_options_response_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );

        let resp = build_options_response(false);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_413_response() {
        let resp = build_413_response();
        assert_eq!(resp.status(), 413);
    }
}
