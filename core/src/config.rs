//! Caller overrides for a request and their merge with the defaults.
//!
//! # Design
//! `RequestConfig` holds only what the caller chose to set. `resolve` folds
//! it together with a parsed `Url` into a complete `RequestOptions`:
//! explicit URL port, then configured port, then the scheme default. The
//! type deserializes from JSON so request settings can live in a file.

use serde::Deserialize;

use crate::error::HttpError;
use crate::headers::HeaderList;
use crate::ports;
use crate::request::RequestOptions;
use crate::url::Url;

pub const DEFAULT_METHOD: &str = "GET";

/// Seconds the transport waits on connect and on each read.
pub const DEFAULT_TIMEOUT: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestConfig {
    pub method: Option<String>,
    pub port: Option<u16>,
    pub ssl: Option<bool>,
    pub timeout: Option<u64>,
    pub headers: HeaderList,
}

impl RequestConfig {
    pub fn from_json(raw: &str) -> Result<Self, HttpError> {
        serde_json::from_str(raw).map_err(|e| HttpError::InvalidConfig(e.to_string()))
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn headers(mut self, headers: impl Into<HeaderList>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Merge with `url` into the options a request is sent with.
    pub fn resolve(&self, url: &Url) -> Result<RequestOptions, HttpError> {
        let ssl = url.ssl || self.ssl.unwrap_or(false);
        let port = match (url.port, self.port) {
            (Some(port), _) | (None, Some(port)) => port,
            (None, None) => ports::default_port(url.scheme.as_deref(), ssl),
        };
        if port == 0 {
            return Err(HttpError::InvalidConfig("port must be positive".to_string()));
        }
        let method = self
            .method
            .as_deref()
            .unwrap_or(DEFAULT_METHOD)
            .to_ascii_uppercase();

        Ok(RequestOptions {
            method,
            host: url.host.clone(),
            port,
            page: url.page.clone(),
            ssl,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            headers: self.headers.with_defaults()?,
            body: None,
        })
    }
}
