//! Referral detection and single-hop follow.
//!
//! Registrar-level WHOIS responses often embed a `Whois Server:` line
//! pointing at the registry's authoritative server. The tool follows at
//! most one such hop; comparing the target against the server already
//! queried guards against referral loops and redundant re-queries.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::TransportError;
use crate::transport;

/// `Whois Server: <host>` referral line in a WHOIS response.
static REFERRAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Whois Server:\s*(\S+)").expect("valid pattern"));

/// Extract a referral target from `raw`, if one exists and differs from the
/// server the response came from. Self-referrals return `None`.
pub fn find_referral(raw: &str, previous_server: &str) -> Option<String> {
    let target = REFERRAL_LINE.captures(raw)?[1].trim().to_string();

    if target.is_empty() || target == previous_server {
        return None;
    }
    Some(target)
}

/// Re-issue the domain query against a referral target. Called at most once
/// per lookup; a failure here is a note on the result, not a lookup error.
pub async fn follow(
    domain: &str,
    target: &str,
    port: u16,
    timeout: Duration,
) -> Result<String, TransportError> {
    transport::query(target, port, domain, timeout).await
}
