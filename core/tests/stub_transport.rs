//! Full exchanges against the in-memory transport.
//!
//! `MemoryTransport` records what the client sends and replays a canned
//! response byte stream through the line and byte primitives.

use minihttp_core::{simple, Client, HttpError, MemoryTransport, RequestConfig, State};

#[test]
fn get_returns_exactly_the_canned_body() {
    let mut stub = MemoryTransport::replying(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\n\r\n<html></html>",
    );
    let body = simple::get_with(&mut stub, "http://example.com/index.html").unwrap();

    assert_eq!(body.len(), 13);
    assert_eq!(body, b"<html></html>");
    assert_eq!(stub.connects, vec![("example.com".to_string(), 80, false, 10)]);
    assert_eq!(
        stub.sent_lines[..2],
        ["GET /index.html HTTP/1.1".to_string(), "Host: example.com".to_string()]
    );
    assert_eq!(stub.sent_lines.last().map(String::as_str), Some(""));
    assert!(stub.sent_bytes.is_empty());
}

#[test]
fn post_404_is_data_not_error() {
    let mut stub = MemoryTransport::replying("HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nnot found");
    let mut client = Client::new("http://example.com/form", &RequestConfig::default().method("POST"), &mut stub)
        .unwrap()
        .body(b"a=1".to_vec());
    let resp = client.send().unwrap();

    assert_eq!(resp.status_code(), 404);
    assert_eq!(resp.status.reason_phrase, "Not Found");
    assert_eq!(resp.body, b"not found");
    assert_eq!(client.state(), State::Complete);
    drop(client);
    assert_eq!(stub.sent_bytes, b"a=1");
}

#[test]
fn simple_post_encodes_params_and_sets_length() {
    let mut stub = MemoryTransport::replying("HTTP/1.1 404 Not Found\r\nContent-Length: 4\r\n\r\ngone");
    let body = simple::post_with(&mut stub, "http://example.com:8080/submit", &[("q", "a b")], None).unwrap();

    assert_eq!(body, b"gone");
    assert_eq!(stub.connects[0].1, 8080);
    assert_eq!(stub.sent_lines[0], "POST /submit HTTP/1.1");
    assert!(stub
        .sent_lines
        .contains(&"Content-Type: application/x-www-form-urlencoded".to_string()));
    assert!(stub.sent_lines.contains(&"Content-Length: 5".to_string()));
    assert_eq!(stub.sent_bytes, b"q=a+b");
}

#[test]
fn header_order_is_defaults_then_caller() {
    let mut stub = MemoryTransport::replying("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    let config = RequestConfig::from_json(r#"{"headers":{"Accept":"*/*","Connection":"keep-alive"}}"#).unwrap();
    Client::new("http://h/", &config, &mut stub).unwrap().send().unwrap();

    let headers = &stub.sent_lines[2..stub.sent_lines.len() - 1];
    assert_eq!(headers[0], "Connection: keep-alive");
    assert!(headers[1].starts_with("User-Agent: minihttp/"));
    assert_eq!(headers[2], "Accept: */*");
    assert_eq!(headers.len(), 3);
}

#[test]
fn garbage_status_line_fails() {
    let mut stub = MemoryTransport::replying("GARBAGE\r\n\r\n");
    let err = simple::get_with(&mut stub, "http://example.com/").unwrap_err();
    assert!(matches!(err, HttpError::MalformedStatusLine(line) if line == "GARBAGE"));
}

#[test]
fn malformed_header_fails_after_status() {
    let mut stub = MemoryTransport::replying("HTTP/1.1 200 OK\r\nno colon here\r\n\r\nbody");
    let mut client = Client::new("http://example.com/", &RequestConfig::default(), &mut stub).unwrap();
    assert!(matches!(client.send(), Err(HttpError::MalformedHeaderLine(_))));
    assert_eq!(client.state(), State::Failed);
}

#[test]
fn construction_errors_never_connect() {
    let mut stub = MemoryTransport::default();
    assert!(matches!(simple::get_with(&mut stub, ""), Err(HttpError::MissingUrl)));
    assert!(matches!(simple::get_with(&mut stub, "http:///x"), Err(HttpError::InvalidUrl(_))));
    let config = RequestConfig::default().headers(&["Name"][..]);
    assert!(matches!(
        simple::post_with(&mut stub, "http://h/", &[], Some(config)),
        Err(HttpError::MalformedHeaderList(1))
    ));
    assert!(stub.connects.is_empty());
}
