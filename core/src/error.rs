//! Error types for the HTTP client.
//!
//! # Design
//! One variant per failure kind. Construction-time variants (`MissingUrl`,
//! `InvalidUrl`, `MalformedHeaderList`, `InvalidConfig`) are raised before
//! any network I/O. `ConnectionFailed` is raised before any bytes are sent.
//! Parse-time variants are raised after partial I/O. A non-2xx status is
//! data on the `Response`, never an error.

use std::fmt;
use std::io;

/// Errors returned while building, sending, or parsing an HTTP exchange.
#[derive(Debug)]
pub enum HttpError {
    /// No URL (or an empty one) was supplied.
    MissingUrl,

    /// The URL does not match `[scheme://]host[:port][/path]`.
    InvalidUrl(String),

    /// A flat header list had an odd number of entries.
    MalformedHeaderList(usize),

    /// The transport could not open a connection.
    ConnectionFailed {
        host: String,
        port: u16,
        reason: String,
    },

    /// The first response line is not `HTTP/x <code> [reason]`.
    MalformedStatusLine(String),

    /// A response header line has no `:` separator.
    MalformedHeaderLine(String),

    /// A JSON request configuration could not be read.
    InvalidConfig(String),

    /// The orchestrator was driven after it already ran its exchange.
    AlreadyUsed,

    /// Sending or receiving failed on an open connection.
    Io(io::Error),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::MissingUrl => write!(f, "a url is required"),
            HttpError::InvalidUrl(url) => write!(f, "invalid url: {url:?}"),
            HttpError::MalformedHeaderList(len) => {
                write!(f, "header list has odd length {len}")
            }
            HttpError::ConnectionFailed { host, port, reason } => {
                write!(f, "couldn't connect to {host}:{port}: {reason}")
            }
            HttpError::MalformedStatusLine(line) => {
                write!(f, "malformed status line: {line:?}")
            }
            HttpError::MalformedHeaderLine(line) => {
                write!(f, "malformed header line: {line:?}")
            }
            HttpError::InvalidConfig(msg) => write!(f, "invalid request config: {msg}"),
            HttpError::AlreadyUsed => write!(f, "request has already been sent"),
            HttpError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        HttpError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_names_the_offending_input() {
        let err = HttpError::MalformedStatusLine("GARBAGE".to_string());
        assert_eq!(err.to_string(), r#"malformed status line: "GARBAGE""#);

        let err = HttpError::ConnectionFailed {
            host: "example.com".to_string(),
            port: 80,
            reason: "refused".to_string(),
        };
        assert_eq!(err.to_string(), "couldn't connect to example.com:80: refused");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: HttpError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, HttpError::Io(_)));
        assert!(err.source().is_some());
        assert!(HttpError::MissingUrl.source().is_none());
    }
}
