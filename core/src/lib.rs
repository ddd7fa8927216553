//! Minimal synchronous HTTP/1.1 client.
//!
//! # Overview
//! Given a URL and optional request settings, a `Client` opens one
//! connection through a `Transport`, writes the request line and headers,
//! and parses the status line, header block and length-delimited body
//! into a `Response`. `simple::get` / `simple::post` wrap that in one call.
//!
//! # Design
//! - One blocking exchange per `Client`; no pooling, keep-alive or retries.
//! - Protocol logic (`url`, `headers`, `request`, `response`) never touches
//!   sockets directly. Everything goes through the `Transport` trait, so
//!   tests drive the full exchange with scripted transports.
//! - Non-2xx statuses are returned as data. Only construction, connection
//!   and parse failures are errors.
//! - Not supported: chunked transfer-encoding, redirects, compression and
//!   TLS (`ssl` is only a flag handed to the transport).

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod ports;
pub mod request;
pub mod response;
pub mod simple;
pub mod transport;
pub mod url;

pub use client::{Client, State};
pub use config::RequestConfig;
pub use error::HttpError;
pub use headers::{HeaderList, HeaderMap};
pub use request::RequestOptions;
pub use response::{Response, StatusLine};
pub use transport::{MemoryTransport, TcpTransport, Transport};
pub use url::Url;
