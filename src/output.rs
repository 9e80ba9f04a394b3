//! Result rendering.
//!
//! Presentation only: color, indentation, and JSON encoding all happen
//! here, after the core has produced plain `LookupResult` records. The
//! `--no-referral` flag is a display filter - it hides referral fields that
//! were already fetched, it does not prevent the fetch.

use colored::Colorize;
use std::fmt::Write;

use crate::lookup::LookupResult;

const BANNER: &str = r"
         _
__ __ __| |_   ___   __ _
\ V  V / ' \ / _ \ / _` |
 \_/\_/|_||_|\___/ \__, |
                      |_|
";

const SEPARATOR_WIDTH: usize = 70;

/// Print the startup banner unless quiet mode is on.
pub fn print_banner(quiet: bool) {
    if !quiet {
        println!("{}", BANNER.cyan());
    }
}

/// Render one result as a colorized text block.
pub fn format_text(result: &LookupResult, no_referral: bool) -> String {
    let mut out = String::new();
    let separator = "=".repeat(SEPARATOR_WIDTH);

    let _ = writeln!(out, "{}", separator.green());
    let _ = writeln!(out, "{}", format!("Domain: {}", result.query).yellow());
    let _ = writeln!(
        out,
        "{}",
        format!("Server used: {}", result.server_used).cyan()
    );

    if !no_referral {
        if let Some(follow) = &result.server_used_follow {
            let _ = writeln!(out, "{}", format!("Referral server used: {}", follow).cyan());
        }
    }

    if let Some(error) = &result.error {
        let _ = writeln!(out, "{} {}", "ERROR:".red(), error);
    } else if let Some(raw) = &result.raw {
        let _ = writeln!(out, "{}", "\n--- WHOIS INFO ---\n".magenta());
        write_clean(&mut out, raw);
    }

    if !no_referral {
        if let Some(raw_follow) = &result.raw_follow {
            let _ = writeln!(out, "{}", "\n--- WHOIS (Referral) ---\n".blue());
            write_clean(&mut out, raw_follow);
        }
    }

    for note in &result.notes {
        let _ = writeln!(out, "{} {}", "NOTE:".yellow(), note);
    }

    let _ = writeln!(out, "{}\n", separator.green());
    out
}

/// Render the whole batch as a pretty-printed JSON array.
pub fn format_json(results: &[LookupResult]) -> String {
    // LookupResult serialization cannot fail: no maps, no non-string keys.
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

/// Append a cleaned raw WHOIS body: CRs and blank lines dropped, every
/// line trimmed and indented.
fn write_clean(out: &mut String, raw: &str) {
    if raw.trim().is_empty() {
        let _ = writeln!(out, "{}", "No WHOIS data.".red());
        return;
    }

    for line in raw.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}", line.white());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupResult;

    fn sample() -> LookupResult {
        LookupResult {
            query: "example.com".to_string(),
            server_used: "whois.verisign-grs.com".to_string(),
            raw: Some("Domain Name: EXAMPLE.COM\r\n\r\n\r\nRegistrar: X\r\n".to_string()),
            server_used_follow: Some("whois.registrar.example".to_string()),
            raw_follow: Some("Registrant: someone\n".to_string()),
            error: None,
            notes: Vec::new(),
        }
    }

    #[test]
    fn format_text_includes_referral_section() {
        colored::control::set_override(false);

        let text = format_text(&sample(), false);

        assert!(text.contains("Domain: example.com"));
        assert!(text.contains("Server used: whois.verisign-grs.com"));
        assert!(text.contains("Referral server used: whois.registrar.example"));
        assert!(text.contains("--- WHOIS (Referral) ---"));
        assert!(text.contains("Registrant: someone"));
    }

    #[test]
    fn no_referral_hides_referral_fields_only() {
        colored::control::set_override(false);

        let text = format_text(&sample(), true);

        assert!(!text.contains("Referral server used"));
        assert!(!text.contains("--- WHOIS (Referral) ---"));
        // Primary fields still render.
        assert!(text.contains("Domain Name: EXAMPLE.COM"));
    }

    #[test]
    fn format_text_renders_error_without_body() {
        colored::control::set_override(false);
        let result = LookupResult {
            query: "example.com".to_string(),
            server_used: "whois.verisign-grs.com".to_string(),
            raw: None,
            server_used_follow: None,
            raw_follow: None,
            error: Some("query to whois.verisign-grs.com timed out after 8s".to_string()),
            notes: Vec::new(),
        };

        let text = format_text(&result, false);

        assert!(text.contains("ERROR:"));
        assert!(text.contains("timed out"));
        assert!(!text.contains("--- WHOIS INFO ---"));
    }

    #[test]
    fn clean_body_drops_blank_lines_and_crs() {
        colored::control::set_override(false);

        let text = format_text(&sample(), false);

        assert!(text.contains("  Domain Name: EXAMPLE.COM\n"));
        assert!(!text.contains('\r'));
        assert!(!text.contains("\n\n\n"));
    }

    #[test]
    fn format_json_emits_array() {
        let results = vec![sample()];

        let json = format_json(&results);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["query"], "example.com");
        assert_eq!(value[0]["server_used_follow"], "whois.registrar.example");
    }
}
