//! Route table module
//!
//! Builds the immutable path -> canned reply table at startup and answers
//! exact-match lookups for the dispatcher.

use crate::config::{RouteReply, RoutesConfig};
use std::collections::HashMap;

/// A reply resolved to the bytes that go on the wire
///
/// JSON bodies are serialized once here so the request path never touches
/// serde again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// Immutable route table, keyed by exact request path
///
/// Built once from the built-in entries plus config overrides; paths are
/// unique by construction.
pub struct RouteTable {
    entries: HashMap<String, CannedReply>,
}

impl RouteTable {
    /// Build the table from configuration
    ///
    /// Config entries are merged over the built-in routes, so a config
    /// file can add paths or replace a built-in reply. Paths must start
    /// with '/' and status codes must be valid HTTP codes.
    pub fn from_config(routes: &RoutesConfig) -> Result<Self, String> {
        let mut entries = builtin_entries();

        for (path, reply) in &routes.entries {
            if !path.starts_with('/') {
                return Err(format!("Route path must start with '/': '{path}'"));
            }
            if !(100..=599).contains(&reply.status()) {
                return Err(format!(
                    "Invalid status code {} for route '{path}'",
                    reply.status()
                ));
            }
            entries.insert(path.clone(), resolve_reply(reply)?);
        }

        Ok(Self { entries })
    }

    /// Exact-match lookup, no prefix or pattern matching
    pub fn lookup(&self, path: &str) -> Option<&CannedReply> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered paths, for the startup banner
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// Resolve a config reply into wire-ready form
fn resolve_reply(reply: &RouteReply) -> Result<CannedReply, String> {
    match reply {
        RouteReply::Text { body, status } => Ok(CannedReply {
            status: *status,
            content_type: "text/plain; charset=utf-8",
            body: body.clone(),
        }),
        RouteReply::Json { body, status } => {
            let body = serde_json::to_string(body)
                .map_err(|e| format!("Failed to serialize JSON reply: {e}"))?;
            Ok(CannedReply {
                status: *status,
                content_type: "application/json",
                body,
            })
        }
    }
}

/// The built-in route set
fn builtin_entries() -> HashMap<String, CannedReply> {
    let mut entries = HashMap::new();
    for (path, body) in [
        ("/", r#"{"message":"Hello, World!"}"#),
        ("/health", r#"{"status":"OK"}"#),
        ("/test", r#"{"message":"Tested"}"#),
        ("/test-again", r#"{"message":"Tested 2"}"#),
        ("/extra-test", r#"{"message":"Extra Test"}"#),
        ("/extra-test2", r#"{"message":"Extra Test 2"}"#),
    ] {
        entries.insert(
            path.to_string(),
            CannedReply {
                status: 200,
                content_type: "application/json",
                body: body.to_string(),
            },
        );
    }
    entries
}
