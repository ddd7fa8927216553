//! URL decomposition into scheme, host, port and page.
//!
//! # Design
//! A split-on-delimiters parser for `[scheme://]host[:port][/path]`. The
//! `https` prefix check runs on the raw string before any splitting, so the
//! ssl flag depends only on how the URL begins. Everything after the host
//! and optional port is kept verbatim as the page, query string included.

use crate::error::HttpError;
use crate::ports;

/// The pieces of a URL the client needs to open a connection and build the
/// request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub scheme: Option<String>,
    pub host: String,
    /// Explicit `:port` segment, if any.
    pub port: Option<u16>,
    /// Always starts with `/`.
    pub page: String,
    pub ssl: bool,
}

impl Url {
    pub fn parse(url: &str) -> Result<Self, HttpError> {
        let invalid = || HttpError::InvalidUrl(url.to_string());
        let ssl = url.starts_with("https");

        // A `://` inside the path or query is not a scheme separator.
        let (scheme, rest) = match url.split_once("://") {
            Some((scheme, rest)) if !scheme.contains(['/', '?']) => {
                if !is_scheme(scheme) {
                    return Err(invalid());
                }
                (Some(scheme.to_string()), rest)
            }
            _ => (None, url),
        };

        let host_end = rest.find([':', '/']).unwrap_or(rest.len());
        let (host, rest) = rest.split_at(host_end);
        if host.is_empty() {
            return Err(invalid());
        }

        let (port, page) = match rest.strip_prefix(':') {
            Some(after_colon) => {
                let digits_end = after_colon.find('/').unwrap_or(after_colon.len());
                let (digits, page) = after_colon.split_at(digits_end);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let port = digits.parse::<u16>().map_err(|_| invalid())?;
                if port == 0 {
                    return Err(invalid());
                }
                (Some(port), page)
            }
            None => (None, rest),
        };

        Ok(Url {
            scheme,
            host: host.to_string(),
            port,
            page: if page.is_empty() { "/".to_string() } else { page.to_string() },
            ssl,
        })
    }

    /// The explicit port, or the ports-table default for the scheme.
    pub fn port_or_default(&self) -> u16 {
        self.port
            .unwrap_or_else(|| ports::default_port(self.scheme.as_deref(), self.ssl))
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
