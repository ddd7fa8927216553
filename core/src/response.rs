//! Incremental response parsing over a `Transport`.
//!
//! # Design
//! Parsing runs in three steps that match the exchange's states: the status
//! line, the header block, then the body. Each step pulls from the
//! transport's line or byte primitives, so nothing past the body is read.
//!
//! The body length comes from a header named exactly `Content-Length`.
//! Lookup is case-sensitive: a server sending `content-length` gets its
//! body read to end of stream instead. Without a usable length the body is
//! everything until the peer closes; chunked encoding is not decoded.
//!
//! If the stream ends before `Content-Length` bytes arrive, the body is
//! whatever was received. A warning is logged; comparing `body.len()`
//! with `content_length(&headers)` detects the truncation.

use tracing::{debug, warn};

use crate::error::HttpError;
use crate::headers::HeaderMap;
use crate::transport::Transport;

const CONTENT_LENGTH: &str = "Content-Length";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub http_version: String,
    pub status_code: u16,
    pub reason_phrase: String,
}

impl StatusLine {
    /// Split on the first two spaces into version, code and reason.
    pub fn parse(line: &str) -> Result<Self, HttpError> {
        let malformed = || HttpError::MalformedStatusLine(line.to_string());
        let mut parts = line.splitn(3, ' ');

        let version = parts.next().unwrap_or_default();
        if !version.starts_with("HTTP/") || version.len() == "HTTP/".len() {
            return Err(malformed());
        }
        let code = parts.next().ok_or_else(malformed)?;
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let status_code = code.parse::<u16>().map_err(|_| malformed())?;

        Ok(StatusLine {
            http_version: version.to_string(),
            status_code,
            reason_phrase: parts.next().unwrap_or_default().to_string(),
        })
    }
}

/// A parsed response. Status codes of any class are returned as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusLine,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status.status_code
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status.status_code)
    }

    /// Exact-match header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Parse a raw header block: one `Name: value` per line.
pub fn parse_headers(block: &str) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    for line in block.lines().filter(|l| !l.is_empty()) {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HttpError::MalformedHeaderLine(line.to_string()))?;
        headers.insert(name, value.trim_start());
    }
    Ok(headers)
}

/// Parsed `Content-Length`, if present and numeric.
pub fn content_length(headers: &HeaderMap) -> Option<usize> {
    let raw = headers.get(CONTENT_LENGTH)?;
    match raw.trim().parse::<usize>() {
        Ok(len) => Some(len),
        Err(_) => {
            warn!(value = raw, "ignoring non-numeric Content-Length");
            None
        }
    }
}

pub fn read_status_line<T: Transport + ?Sized>(transport: &mut T) -> Result<StatusLine, HttpError> {
    let line = transport
        .receive_line()?
        .ok_or_else(|| HttpError::MalformedStatusLine(String::new()))?;
    let status = StatusLine::parse(&line)?;
    debug!(
        version = %status.http_version,
        code = status.status_code,
        reason = %status.reason_phrase,
        "parsed status line"
    );
    Ok(status)
}

/// Read header lines up to the blank line (or end of stream) and parse them.
pub fn read_headers<T: Transport + ?Sized>(transport: &mut T) -> Result<HeaderMap, HttpError> {
    let mut block = String::new();
    while let Some(line) = transport.receive_line()? {
        if line.is_empty() {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }
    parse_headers(&block)
}

pub fn read_body<T: Transport + ?Sized>(
    transport: &mut T,
    headers: &HeaderMap,
) -> Result<Vec<u8>, HttpError> {
    let body = match content_length(headers) {
        Some(len) => {
            debug!(len, "reading length-delimited body");
            let body = transport.receive(len)?;
            if body.len() < len {
                warn!(expected = len, received = body.len(), "stream ended before full body");
            }
            body
        }
        None => {
            debug!("no usable Content-Length, reading body to end of stream");
            transport.receive_to_end()?
        }
    };
    Ok(body)
}

/// Run all three parse steps.
#[tracing::instrument(skip(transport), level = "debug")]
pub fn read_response<T: Transport + ?Sized>(transport: &mut T) -> Result<Response, HttpError> {
    let status = read_status_line(transport)?;
    let headers = read_headers(transport)?;
    let body = read_body(transport, &headers)?;
    Ok(Response { status, headers, body })
}
