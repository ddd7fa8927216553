//! One-call `get` and `post` helpers.
//!
//! Each call builds one `Client`, runs it, and returns only the body. The
//! status is not checked: a 404 body comes back like a 200 body. Use
//! `Client` directly to see the status line and headers.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::client::Client;
use crate::config::RequestConfig;
use crate::error::HttpError;
use crate::transport::{TcpTransport, Transport};

/// `application/x-www-form-urlencoded` keeps `*-._` as is.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

pub fn get(url: &str) -> Result<Vec<u8>, HttpError> {
    get_with(TcpTransport::new(), url)
}

pub fn post(
    url: &str,
    params: &[(&str, &str)],
    config: Option<RequestConfig>,
) -> Result<Vec<u8>, HttpError> {
    post_with(TcpTransport::new(), url, params, config)
}

pub fn get_with<T: Transport>(transport: T, url: &str) -> Result<Vec<u8>, HttpError> {
    let mut client = Client::new(url, &RequestConfig::default(), transport)?;
    Ok(client.send()?.body)
}

/// Form-encode `params` as the body. The method is `POST` unless `config`
/// names another one.
pub fn post_with<T: Transport>(
    transport: T,
    url: &str,
    params: &[(&str, &str)],
    config: Option<RequestConfig>,
) -> Result<Vec<u8>, HttpError> {
    let mut config = config.unwrap_or_default();
    if config.method.is_none() {
        config.method = Some("POST".to_string());
    }

    let body = form_encode(params).into_bytes();
    let mut client = Client::new(url, &config, transport)?
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Content-Length", body.len().to_string())
        .body(body);
    Ok(client.send()?.body)
}

pub fn form_encode(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, FORM).to_string().replace("%20", "+")
}
