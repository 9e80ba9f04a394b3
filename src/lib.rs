//! Whoq - a WHOIS lookup tool.
//!
//! This library exposes the lookup pipeline (server discovery, TCP query,
//! referral follow) for testing and reuse; the binary is a thin CLI shell.

pub mod batch;
pub mod error;
pub mod lookup;
pub mod output;
pub mod referral;
pub mod resolver;
pub mod transport;

pub use lookup::{LookupRequest, LookupResult, lookup};
