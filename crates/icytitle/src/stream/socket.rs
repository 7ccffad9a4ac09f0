//! Raw socket transport
//!
//! Speaks HTTP/1.0 over a plain `TcpStream`. Shoutcast servers predate
//! HTTP in places — the status line may read `ICY 200 OK` and header values
//! may carry Latin-1 bytes — so status and headers are parsed from raw bytes
//! rather than through an HTTP client. Plain `http` URLs only; there is no
//! TLS stack on this path.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::network::CONNECT_TIMEOUT_SECS;
use crate::config::FetchConfig;
use crate::error::{Result, TitleError};
use crate::stream::transport::{StreamHandle, Transport};

/// Reaches the server over a raw TCP connection
pub struct SocketTransport;

impl Transport for SocketTransport {
    fn open(&self, url: &str, config: &FetchConfig) -> Result<StreamHandle> {
        let parsed =
            Url::parse(url).map_err(|e| TitleError::Stream(format!("invalid URL {url:?}: {e}")))?;
        if parsed.scheme() != "http" {
            return Err(TitleError::Stream(format!(
                "socket transport supports plain http only, got {:?}",
                parsed.scheme()
            )));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| TitleError::Stream(format!("URL {url:?} has no host")))?;
        let port = parsed.port().unwrap_or(80);

        let mut stream = connect(host, port)?;
        stream.set_read_timeout(Some(config.read_timeout))?;

        let mut path = parsed.path().to_string();
        if let Some(query) = parsed.query() {
            path.push('?');
            path.push_str(query);
        }

        let request = format!(
            "GET {path} HTTP/1.0\r\nHost: {host}\r\nUser-Agent: {ua}\r\nIcy-MetaData: 1\r\nConnection: close\r\n\r\n",
            ua = config.user_agent
        );
        stream.write_all(request.as_bytes())?;

        let mut reader = BufReader::new(stream);

        let code = parse_status_code(&read_response_line(&mut reader)?)?;
        if !(200..300).contains(&code) {
            return Err(TitleError::Stream(format!("HTTP {code}")));
        }

        let headers = read_response_headers(&mut reader)?;
        Ok(StreamHandle {
            headers,
            body: Box::new(reader),
        })
    }
}

fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, Duration::from_secs(CONNECT_TIMEOUT_SECS)) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(match last_err {
        Some(e) => TitleError::Io(e),
        None => TitleError::Stream(format!("no addresses resolved for {host}:{port}")),
    })
}

fn read_response_line(reader: &mut impl BufRead) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(TitleError::Stream(
            "connection closed before response headers".to_string(),
        ));
    }
    while matches!(line.last(), Some(b'\r' | b'\n')) {
        line.pop();
    }
    Ok(line)
}

/// Accepts both `HTTP/1.0 200 OK` and the bare Shoutcast `ICY 200 OK` form.
fn parse_status_code(line: &[u8]) -> Result<u16> {
    let text = String::from_utf8_lossy(line);
    text.split_whitespace()
        .nth(1)
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| TitleError::Stream(format!("malformed status line {text:?}")))
}

/// Read header lines up to the blank separator. Unparseable lines are
/// skipped; repeated names keep every value so that last-wins lookups work.
fn read_response_headers(reader: &mut impl BufRead) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    loop {
        let line = read_response_line(reader)?;
        if line.is_empty() {
            return Ok(headers);
        }
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        let name = line[..colon].trim_ascii();
        let value = line[colon + 1..].trim_ascii();
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name), HeaderValue::from_bytes(value))
        {
            headers.append(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::headers::resolve_metaint;
    use std::io::{Cursor, Read};

    // --- parse_status_code ---

    #[test]
    fn status_http_10() {
        assert_eq!(parse_status_code(b"HTTP/1.0 200 OK").unwrap(), 200);
    }

    #[test]
    fn status_icy_form() {
        assert_eq!(parse_status_code(b"ICY 200 OK").unwrap(), 200);
    }

    #[test]
    fn status_not_found() {
        assert_eq!(parse_status_code(b"HTTP/1.1 404 Not Found").unwrap(), 404);
    }

    #[test]
    fn status_malformed() {
        assert!(matches!(
            parse_status_code(b"garbage"),
            Err(TitleError::Stream(_))
        ));
    }

    // --- header parsing ---

    #[test]
    fn headers_parse_and_stop_at_blank_line() {
        let raw = b"icy-metaint: 8192\r\nicy-name: Test FM\r\n\r\nBODY";
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 8192);
        assert_eq!(
            headers.get("icy-name").and_then(|v| v.to_str().ok()),
            Some("Test FM")
        );

        let mut body = Vec::new();
        reader.read_to_end(&mut body).unwrap();
        assert_eq!(body, b"BODY");
    }

    #[test]
    fn headers_mixed_case_names() {
        let raw = b"Icy-MetaInt: 16000\r\n\r\n";
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 16000);
    }

    #[test]
    fn headers_repeated_name_keeps_both_values() {
        let raw = b"icy-metaint: 8192\r\nicy-metaint: 16384\r\n\r\n";
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 16384);
    }

    #[test]
    fn headers_skip_unparseable_lines() {
        let raw = b"not a header line\r\nicy-metaint: 4096\r\n\r\n";
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 4096);
    }

    #[test]
    fn headers_tolerate_latin1_value() {
        let mut raw = b"icy-name: Caf".to_vec();
        raw.push(0xE9); // é in Latin-1
        raw.extend_from_slice(b"\r\nicy-metaint: 8192\r\n\r\n");
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 8192);
        assert!(headers.get("icy-name").is_some());
    }

    #[test]
    fn headers_closed_mid_stream() {
        let raw = b"icy-metaint: 8192\r\n"; // no terminating blank line
        let mut reader = Cursor::new(&raw[..]);
        assert!(matches!(
            read_response_headers(&mut reader),
            Err(TitleError::Stream(_))
        ));
    }

    #[test]
    fn headers_lf_only_line_endings() {
        let raw = b"icy-metaint: 8192\n\nBODY";
        let mut reader = Cursor::new(&raw[..]);
        let headers = read_response_headers(&mut reader).unwrap();
        assert_eq!(resolve_metaint(&headers).unwrap(), 8192);
    }

    // --- scheme handling ---

    #[test]
    fn https_rejected_without_network_access() {
        let result = SocketTransport.open("https://example.com/stream", &FetchConfig::default());
        assert!(matches!(result, Err(TitleError::Stream(_))));
    }

    #[test]
    fn garbage_url_rejected() {
        let result = SocketTransport.open("not a url", &FetchConfig::default());
        assert!(matches!(result, Err(TitleError::Stream(_))));
    }
}
