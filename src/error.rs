//! Error types for WHOIS lookups.
//!
//! Transport failures abort a single domain's lookup; batch file failures
//! abort the whole run. Decode problems never surface here - server output
//! is decoded lossily and can't fail.

use std::io;
use thiserror::Error;

/// Failure of a single WHOIS query over TCP.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Could not establish the TCP connection.
    #[error("connection to {server} failed: {source}")]
    Connect {
        server: String,
        #[source]
        source: io::Error,
    },

    /// Connected, but reading or writing failed before the peer closed.
    #[error("I/O error talking to {server}: {source}")]
    Io {
        server: String,
        #[source]
        source: io::Error,
    },

    /// The whole connect+send+receive sequence exceeded the timeout budget.
    #[error("query to {server} timed out after {secs}s")]
    Timeout { server: String, secs: f64 },
}

/// The batch file could not be read. Fatal to the whole run (exit code 2).
#[derive(Error, Debug)]
#[error("failed to read batch file {path}: {source}")]
pub struct BatchFileError {
    pub path: String,
    #[source]
    pub source: io::Error,
}
