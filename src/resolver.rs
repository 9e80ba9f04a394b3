//! WHOIS server discovery.
//!
//! WHOIS has no protocol-level server discovery; the de facto bootstrap is
//! the IANA root registry, which answers a bare TLD query with a
//! `whois: <server>` line. The root server is slow and unreliable enough
//! that discovery failures must never abort a lookup - they degrade to a
//! static fallback guess instead.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::transport;

/// The root registry server, canonical bootstrap for TLD discovery.
pub const ROOT_REGISTRY: &str = "whois.iana.org";

/// Bootstrap queries always go to the registry on the standard WHOIS port,
/// independent of whatever port the target query uses.
pub(crate) const REGISTRY_PORT: u16 = 43;

/// Fallback for com/net when discovery yields nothing.
const VERISIGN: &str = "whois.verisign-grs.com";

/// Fallback for the .id country registry.
const PANDI: &str = "whois.pandi.or.id";

/// `whois: <server>` line in a root registry response.
static WHOIS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)whois:\s*(\S+)").expect("valid pattern"));

/// Determine which WHOIS server to query for `domain`.
///
/// An explicit `server_override` wins outright - no discovery is attempted.
/// Otherwise the TLD is looked up against the root registry; if that fails
/// or yields no `whois:` line, a static fallback table applies.
pub async fn resolve_server(
    domain: &str,
    server_override: Option<&str>,
    timeout: Duration,
) -> String {
    if let Some(server) = server_override {
        return server.to_string();
    }
    resolve_with_registry(domain, ROOT_REGISTRY, REGISTRY_PORT, timeout).await
}

/// Discovery against an explicit registry host and port. Split out so tests
/// can aim it at a local mock instead of the real root server.
pub(crate) async fn resolve_with_registry(
    domain: &str,
    registry: &str,
    port: u16,
    timeout: Duration,
) -> String {
    let domain = domain.to_lowercase();
    let labels: Vec<&str> = domain.split('.').collect();

    // Malformed input (bare TLD, empty string): query the root directly.
    if labels.len() < 2 {
        return registry.to_string();
    }

    let tld = labels[labels.len() - 1];
    if let Some(server) = discover_tld_server(tld, registry, port, timeout).await {
        return server;
    }

    fallback_server(tld, &domain, registry)
}

/// Ask the registry which server is authoritative for `tld`.
///
/// Best effort: network failure is swallowed and treated as "no answer" so
/// the caller falls through to the static fallback.
async fn discover_tld_server(
    tld: &str,
    registry: &str,
    port: u16,
    timeout: Duration,
) -> Option<String> {
    let response = match transport::query(registry, port, tld, timeout).await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("TLD discovery for .{} failed: {}", tld, e);
            return None;
        }
    };

    WHOIS_LINE
        .captures(&response)
        .map(|caps| caps[1].trim().to_string())
}

/// Static last-resort table when discovery yields nothing. The root registry
/// itself is the final fallback; it typically returns only referral info
/// rather than full registration data.
fn fallback_server(tld: &str, domain: &str, registry: &str) -> String {
    match tld {
        "com" | "net" => VERISIGN.to_string(),
        "id" => PANDI.to_string(),
        _ if domain.ends_with(".sch.id") => PANDI.to_string(),
        _ => registry.to_string(),
    }
}
