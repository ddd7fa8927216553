//! Wire-format request serialization.
//!
//! # Design
//! `build` turns `RequestOptions` into the text lines of the request head:
//! request line, `Host`, one line per header, then a single blank line.
//! Line terminators are added by the transport. An optional body is sent
//! by the client as raw bytes after the head.

use crate::headers::HeaderMap;

/// Everything needed to send one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Uppercase method name.
    pub method: String,
    pub host: String,
    pub port: u16,
    /// Request target, always starting with `/`.
    pub page: String,
    pub ssl: bool,
    /// Seconds.
    pub timeout: u64,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Request head as text lines, ending with one empty line.
pub fn build(options: &RequestOptions) -> Vec<String> {
    let mut lines = Vec::with_capacity(options.headers.len() + 3);
    lines.push(format!("{} {} HTTP/1.1", options.method, options.page));
    lines.push(format!("Host: {}", options.host));
    lines.extend(options.headers.lines());
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RequestOptions {
        RequestOptions {
            method: "GET".to_string(),
            host: "example.com".to_string(),
            port: 80,
            page: "/index.html".to_string(),
            ssl: false,
            timeout: 10,
            headers: [("Connection", "close"), ("Accept", "*/*")].into_iter().collect(),
            body: None,
        }
    }

    #[test]
    fn head_layout() {
        let lines = build(&options());
        assert_eq!(
            lines,
            vec![
                "GET /index.html HTTP/1.1",
                "Host: example.com",
                "Connection: close",
                "Accept: */*",
                "",
            ]
        );
    }

    #[test]
    fn exactly_one_trailing_blank_line() {
        let mut opts = options();
        opts.headers = HeaderMap::new();
        let lines = build(&opts);
        assert_eq!(lines[1], "Host: example.com");
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 1);
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }
}
