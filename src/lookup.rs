//! Lookup orchestration.
//!
//! Composes resolver, transport and referral follow into a single domain
//! lookup producing a `LookupResult`. Every lookup is independent: no state
//! is shared or persisted across lookups, and there are no retries beyond
//! the single referral hop.

use serde::Serialize;
use std::time::Duration;

use crate::{referral, resolver, transport};

/// Standard WHOIS port (RFC 3912).
pub const DEFAULT_PORT: u16 = 43;

/// Default budget for one query, connect through connection close.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Parameters for a single domain lookup.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// Domain to query. Trimmed before use.
    pub domain: String,
    /// Explicit WHOIS server, skipping discovery.
    pub server: Option<String>,
    pub port: u16,
    /// Applies independently to each query (primary and referral).
    pub timeout: Duration,
}

impl LookupRequest {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            server: None,
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Outcome of one domain lookup.
///
/// `raw` and `error` are mutually informative: a failed primary query sets
/// `error` and leaves `raw` absent; a successful one sets `raw`. Referral
/// fields are present only when a referral was actually followed; a failed
/// follow lands in `notes` and never overrides a successful primary result.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub query: String,
    pub server_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_used_follow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_follow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Perform one WHOIS lookup: resolve the server, query it, and follow a
/// single referral if the response points somewhere more specific.
pub async fn lookup(request: &LookupRequest) -> LookupResult {
    let domain = request.domain.trim();

    // Discovery always bootstraps against the root registry on the standard
    // port; `request.port` applies only to the target (and referral) queries.
    let server =
        resolver::resolve_server(domain, request.server.as_deref(), request.timeout).await;

    let mut result = LookupResult {
        query: domain.to_string(),
        server_used: server.clone(),
        raw: None,
        server_used_follow: None,
        raw_follow: None,
        error: None,
        notes: Vec::new(),
    };

    let raw = match transport::query(&server, request.port, domain, request.timeout).await {
        Ok(raw) => raw,
        Err(e) => {
            // No referral attempt on a failed primary query.
            result.error = Some(e.to_string());
            return result;
        }
    };

    if let Some(target) = referral::find_referral(&raw, &server) {
        match referral::follow(domain, &target, request.port, request.timeout).await {
            Ok(raw_follow) => {
                result.server_used_follow = Some(target);
                result.raw_follow = Some(raw_follow);
            }
            Err(e) => {
                log::warn!("referral follow for {} failed: {}", domain, e);
                result.notes.push(format!("follow referral failed: {}", e));
            }
        }
    }

    result.raw = Some(raw);
    result
}
