//! Blocking stream transport used by the client.
//!
//! # Design
//! `Transport` is the seam between protocol logic and sockets. The client
//! only needs a handful of blocking primitives: connect, send text lines,
//! send raw bytes, and receive a line, N bytes, or everything up to EOF.
//! `TcpTransport` implements them over `std::net::TcpStream`.
//! `MemoryTransport` replays a canned byte stream and records what was
//! sent, for tests and offline replays.
//!
//! Received lines are capped at `MAX_LINE_LEN` bytes. Byte reads never
//! preallocate more than `MAX_PREALLOC`, whatever count the peer announced.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

/// Longest line `receive_line` accepts, terminator included.
pub const MAX_LINE_LEN: usize = 8 * 1024;

const MAX_PREALLOC: usize = 64 * 1024;

pub trait Transport {
    /// Open a connection. `timeout` is in seconds; zero disables it.
    fn connect(&mut self, host: &str, port: u16, ssl: bool, timeout: u64) -> io::Result<()>;

    /// Send each line followed by CRLF.
    fn send_lines(&mut self, lines: &[String]) -> io::Result<()>;

    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Next line without its terminator, or `None` at end of stream.
    fn receive_line(&mut self) -> io::Result<Option<String>>;

    /// Up to `n` bytes; fewer only if the stream ends first.
    fn receive(&mut self, n: usize) -> io::Result<Vec<u8>>;

    fn receive_to_end(&mut self) -> io::Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn connect(&mut self, host: &str, port: u16, ssl: bool, timeout: u64) -> io::Result<()> {
        (**self).connect(host, port, ssl, timeout)
    }

    fn send_lines(&mut self, lines: &[String]) -> io::Result<()> {
        (**self).send_lines(lines)
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).send(bytes)
    }

    fn receive_line(&mut self) -> io::Result<Option<String>> {
        (**self).receive_line()
    }

    fn receive(&mut self, n: usize) -> io::Result<Vec<u8>> {
        (**self).receive(n)
    }

    fn receive_to_end(&mut self) -> io::Result<Vec<u8>> {
        (**self).receive_to_end()
    }
}

/// Plain TCP transport. TLS is not supported.
#[derive(Debug, Default)]
pub struct TcpTransport {
    reader: Option<BufReader<TcpStream>>,
}

impl TcpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> io::Result<&mut BufReader<TcpStream>> {
        self.reader
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "transport is not connected"))
    }
}

impl Transport for TcpTransport {
    fn connect(&mut self, host: &str, port: u16, ssl: bool, timeout: u64) -> io::Result<()> {
        if ssl {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "tls is not supported by the tcp transport",
            ));
        }
        let timeout = (timeout > 0).then(|| Duration::from_secs(timeout));

        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            let attempt = match timeout {
                Some(t) => TcpStream::connect_timeout(&addr, t),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream.set_read_timeout(timeout)?;
                    stream.set_write_timeout(timeout)?;
                    debug!(%addr, "connected");
                    self.reader = Some(BufReader::new(stream));
                    return Ok(());
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no addresses for {host}"))
        }))
    }

    fn send_lines(&mut self, lines: &[String]) -> io::Result<()> {
        let buf: String = lines.iter().map(|line| format!("{line}\r\n")).collect();
        self.send(buf.as_bytes())
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self.stream()?.get_mut();
        stream.write_all(bytes)?;
        stream.flush()
    }

    fn receive_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        self.stream()?
            .take(MAX_LINE_LEN as u64)
            .read_until(b'\n', &mut raw)?;
        if raw.is_empty() {
            return Ok(None);
        }
        if raw.len() == MAX_LINE_LEN && !raw.ends_with(b"\n") {
            return Err(line_too_long());
        }
        decode_line(raw).map(Some)
    }

    fn receive(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n.min(MAX_PREALLOC));
        self.stream()?.take(n as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn receive_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.stream()?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// In-memory transport: replays `incoming` and records everything sent.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub incoming: VecDeque<u8>,
    /// Fail `connect` with `ConnectionRefused`.
    pub refuse: bool,
    /// `(host, port, ssl, timeout)` of every connect call.
    pub connects: Vec<(String, u16, bool, u64)>,
    pub sent_lines: Vec<String>,
    pub sent_bytes: Vec<u8>,
}

impl MemoryTransport {
    pub fn replying(raw: impl AsRef<[u8]>) -> Self {
        Self {
            incoming: raw.as_ref().iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl Transport for MemoryTransport {
    fn connect(&mut self, host: &str, port: u16, ssl: bool, timeout: u64) -> io::Result<()> {
        if self.refuse {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"));
        }
        self.connects.push((host.to_string(), port, ssl, timeout));
        Ok(())
    }

    fn send_lines(&mut self, lines: &[String]) -> io::Result<()> {
        self.sent_lines.extend_from_slice(lines);
        Ok(())
    }

    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sent_bytes.extend_from_slice(bytes);
        Ok(())
    }

    fn receive_line(&mut self) -> io::Result<Option<String>> {
        if self.incoming.is_empty() {
            return Ok(None);
        }
        let end = match self.incoming.iter().position(|&b| b == b'\n') {
            Some(i) if i < MAX_LINE_LEN => i + 1,
            None if self.incoming.len() < MAX_LINE_LEN => self.incoming.len(),
            _ => return Err(line_too_long()),
        };
        decode_line(self.incoming.drain(..end).collect()).map(Some)
    }

    fn receive(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let n = n.min(self.incoming.len());
        Ok(self.incoming.drain(..n).collect())
    }

    fn receive_to_end(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.incoming.drain(..).collect())
    }
}

fn line_too_long() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line longer than {MAX_LINE_LEN} bytes"),
    )
}

fn decode_line(raw: Vec<u8>) -> io::Result<String> {
    let line = String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(trim_line_end(line))
}

/// Strip one trailing `\n` and an optional `\r` before it.
pub(crate) fn trim_line_end(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_crlf_and_lf() {
        assert_eq!(trim_line_end("abc\r\n".to_string()), "abc");
        assert_eq!(trim_line_end("abc\n".to_string()), "abc");
        assert_eq!(trim_line_end("abc".to_string()), "abc");
        assert_eq!(trim_line_end("\r\n".to_string()), "");
        assert_eq!(trim_line_end("abc\n\n".to_string()), "abc\n");
    }

    #[test]
    fn refuses_ssl() {
        let err = TcpTransport::new()
            .connect("localhost", 443, true, 1)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn io_before_connect_fails() {
        let mut transport = TcpTransport::new();
        let err = transport.receive_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn memory_lines_strip_one_terminator() {
        let mut t = MemoryTransport::replying("a\r\n\r\nb\n\nc");
        assert_eq!(t.receive_line().unwrap().as_deref(), Some("a"));
        assert_eq!(t.receive_line().unwrap().as_deref(), Some(""));
        assert_eq!(t.receive_line().unwrap().as_deref(), Some("b"));
        assert_eq!(t.receive_line().unwrap().as_deref(), Some(""));
        assert_eq!(t.receive_line().unwrap().as_deref(), Some("c"));
        assert_eq!(t.receive_line().unwrap(), None);
    }

    #[test]
    fn memory_receive_stops_at_end_of_stream() {
        let mut t = MemoryTransport::replying("abc");
        assert_eq!(t.receive(usize::MAX).unwrap(), b"abc");
        assert!(t.receive(1).unwrap().is_empty());
    }

    #[test]
    fn memory_rejects_overlong_line() {
        let mut t = MemoryTransport::replying(vec![b'a'; MAX_LINE_LEN + 1]);
        let err = t.receive_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let mut t = MemoryTransport::replying(vec![b'a'; MAX_LINE_LEN]);
        assert_eq!(t.receive_line().unwrap_err().kind(), io::ErrorKind::InvalidData);

        let mut line = vec![b'a'; MAX_LINE_LEN - 1];
        line.push(b'\n');
        let mut t = MemoryTransport::replying(line);
        assert_eq!(t.receive_line().unwrap().map(|l| l.len()), Some(MAX_LINE_LEN - 1));
    }

    #[test]
    fn refusing_memory_transport_records_nothing() {
        let mut t = MemoryTransport::refusing();
        let err = t.connect("h", 80, false, 10).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionRefused);
        assert!(t.connects.is_empty());
    }
}
