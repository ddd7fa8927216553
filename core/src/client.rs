//! Single-use orchestrator for one HTTP exchange.
//!
//! # Design
//! `Client` owns its transport for its whole life and runs exactly one
//! exchange: parse URL, connect, send, then read status line, headers and
//! body. All validation happens in `new`, so a construction error means no
//! network I/O took place. `send` walks the states in order and parks in
//! `Failed` at the first error. There is no retry and no reuse; callers
//! that want another attempt build another `Client`.

use tracing::{debug, warn};

use crate::config::RequestConfig;
use crate::error::HttpError;
use crate::request::{self, RequestOptions};
use crate::response::{self, Response};
use crate::transport::Transport;
use crate::url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Constructing,
    Connecting,
    Sending,
    AwaitingStatus,
    ReadingHeaders,
    ReadingBody,
    Complete,
    Failed,
}

#[derive(Debug)]
pub struct Client<T: Transport> {
    options: RequestOptions,
    transport: T,
    state: State,
}

impl<T: Transport> Client<T> {
    pub fn new(url: &str, config: &RequestConfig, transport: T) -> Result<Self, HttpError> {
        if url.trim().is_empty() {
            return Err(HttpError::MissingUrl);
        }
        let url = Url::parse(url)?;
        let options = config.resolve(&url)?;
        Ok(Self::with_options(options, transport))
    }

    /// Skip URL parsing and config merging.
    pub fn with_options(options: RequestOptions, transport: T) -> Self {
        Self {
            options,
            transport,
            state: State::Constructing,
        }
    }

    /// Set one request header, replacing any earlier value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.insert(name, value);
        self
    }

    /// Attach a body sent after the request head.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.options.body = Some(body);
        self
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run the exchange. Only the first call talks to the network.
    pub fn send(&mut self) -> Result<Response, HttpError> {
        if self.state != State::Constructing {
            return Err(HttpError::AlreadyUsed);
        }
        match self.exchange() {
            Ok(response) => {
                self.transition(State::Complete);
                Ok(response)
            }
            Err(e) => {
                warn!(
                    host = %self.options.host,
                    port = self.options.port,
                    state = ?self.state,
                    error = %e,
                    "request failed"
                );
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    fn exchange(&mut self) -> Result<Response, HttpError> {
        self.transition(State::Connecting);
        let opts = &self.options;
        self.transport
            .connect(&opts.host, opts.port, opts.ssl, opts.timeout)
            .map_err(|e| HttpError::ConnectionFailed {
                host: opts.host.clone(),
                port: opts.port,
                reason: e.to_string(),
            })?;

        self.transition(State::Sending);
        self.transport.send_lines(&request::build(&self.options))?;
        if let Some(body) = &self.options.body {
            self.transport.send(body)?;
        }

        self.transition(State::AwaitingStatus);
        let status = response::read_status_line(&mut self.transport)?;

        self.transition(State::ReadingHeaders);
        let headers = response::read_headers(&mut self.transport)?;

        self.transition(State::ReadingBody);
        let body = response::read_body(&mut self.transport, &headers)?;

        Ok(Response { status, headers, body })
    }

    fn transition(&mut self, next: State) {
        debug!(from = ?self.state, to = ?next, "request state");
        self.state = next;
    }
}
