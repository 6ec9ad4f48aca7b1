use super::{Headers, HttpVersion};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    /// Request target exactly as sent.
    pub uri: String,
    pub version: HttpVersion,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub cookies: HashMap<String, String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid request line")]
    InvalidRequestLine,
    #[error("Invalid HTTP method")]
    InvalidMethod,
    #[error("Invalid HTTP version")]
    InvalidVersion,
    #[error("Invalid header")]
    InvalidHeader,
    #[error("Incomplete request")]
    IncompleteRequest,
}

impl HttpRequest {
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            uri: "/".to_string(),
            version: HttpVersion::default(),
            headers: HashMap::new(),
            body: Vec::new(),
            cookies: HashMap::new(),
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let request_str = String::from_utf8_lossy(data);
        if request_str.trim().is_empty() {
            return Err(ParseError::IncompleteRequest);
        }

        let (header_part, body_part) = match request_str.split_once("\r\n\r\n") {
            Some((headers, body)) => (headers, body.as_bytes()),
            None => (&*request_str, &[][..]),
        };

        let mut lines = header_part.lines();

        let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
        let (method, uri, version) = Self::parse_request_line(request_line)?;

        let mut headers = HashMap::new();
        for line in lines {
            if line.is_empty() {
                break;
            }
            Self::parse_header_line(line, &mut headers)?;
        }

        let cookies = headers
            .get("cookie")
            .map(|header: &String| Self::parse_cookies(header))
            .unwrap_or_default();

        Ok(HttpRequest {
            method,
            uri,
            version,
            headers,
            body: body_part.to_vec(),
            cookies,
        })
    }

    fn parse_request_line(line: &str) -> Result<(String, String, HttpVersion), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        // Any token is a method; the identifier does not depend on it.
        let method = parts[0];
        if !method.bytes().all(|b| b.is_ascii_uppercase() || b == b'-' || b == b'_') {
            return Err(ParseError::InvalidMethod);
        }
        let version = HttpVersion::from_str(parts[2]).map_err(|_| ParseError::InvalidVersion)?;

        Ok((method.to_string(), parts[1].to_string(), version))
    }

    /// Repeated headers are folded into one value: `Cookie` lines with `"; "`,
    /// everything else with `", "`.
    fn parse_header_line(line: &str, headers: &mut Headers) -> Result<(), ParseError> {
        let (name, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let name = name.trim().to_lowercase();
        let value = value.trim();

        if let Some(existing) = headers.get_mut(&name) {
            existing.push_str(if name == "cookie" { "; " } else { ", " });
            existing.push_str(value);
            return Ok(());
        }
        headers.insert(name, value.to_string());
        Ok(())
    }

    /// Parses a `Cookie` header. Pairs without `=` are skipped and the first
    /// occurrence of a repeated name wins.
    pub fn parse_cookies(header: &str) -> HashMap<String, String> {
        let mut cookies = HashMap::new();

        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }

        cookies
    }

    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_lowercase(), value.to_string());
    }

    pub fn host(&self) -> Option<&String> {
        self.get_header("host")
    }

    /// First entry of `X-Forwarded-Host`, as appended by the nearest proxy chain.
    pub fn forwarded_host(&self) -> Option<&str> {
        self.get_header("x-forwarded-host")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    pub fn cookie(&self, name: &str) -> Option<&String> {
        self.cookies.get(name)
    }

    /// Places a cookie into this request's jar so that later readers of the
    /// same request observe it.
    pub fn attach_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_cookies() {
        let raw = b"GET /page?a=1 HTTP/1.1\r\nHost: www.example.com\r\nCookie: z=abc; other=1\r\n\r\n";
        let request = HttpRequest::parse(raw).unwrap();

        assert_eq!(request.method, "GET");
        assert_eq!(request.uri, "/page?a=1");
        assert_eq!(request.host().map(String::as_str), Some("www.example.com"));
        assert_eq!(request.cookie("z").map(String::as_str), Some("abc"));
        assert_eq!(request.cookie("other").map(String::as_str), Some("1"));
    }

    #[test]
    fn first_cookie_occurrence_wins() {
        let cookies = HttpRequest::parse_cookies("z=first; junk; =nameless; z=second");
        assert_eq!(cookies.get("z").map(String::as_str), Some("first"));
        assert_eq!(cookies.len(), 1);
    }

    #[test]
    fn rejects_malformed_request_line() {
        assert_eq!(
            HttpRequest::parse(b"GET /\r\n\r\n").unwrap_err(),
            ParseError::InvalidRequestLine
        );
        assert_eq!(
            HttpRequest::parse(b"get; / HTTP/1.1\r\n\r\n").unwrap_err(),
            ParseError::InvalidMethod
        );
        assert_eq!(
            HttpRequest::parse(b"GET / HTTX\r\n\r\n").unwrap_err(),
            ParseError::InvalidVersion
        );
        assert_eq!(HttpRequest::parse(b"").unwrap_err(), ParseError::IncompleteRequest);
    }

    #[test]
    fn accepts_any_method_token() {
        let request = HttpRequest::parse(b"PATCH /item HTTP/1.1\r\nHost: a.example.com\r\n\r\n").unwrap();
        assert_eq!(request.method, "PATCH");
    }

    #[test]
    fn repeated_cookie_lines_are_all_read() {
        let raw = b"GET / HTTP/1.1\r\nCookie: z=00112233445566778899aabbccddeeff\r\nCookie: theme=dark\r\n\r\n";
        let request = HttpRequest::parse(raw).unwrap();

        assert_eq!(
            request.cookie("z").map(String::as_str),
            Some("00112233445566778899aabbccddeeff")
        );
        assert_eq!(request.cookie("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn repeated_headers_are_folded() {
        let raw = b"GET / HTTP/1.1\r\nX-Forwarded-Host: a.example.com\r\nX-Forwarded-Host: b.example.com\r\n\r\n";
        let request = HttpRequest::parse(raw).unwrap();
        assert_eq!(request.forwarded_host(), Some("a.example.com"));
    }

    #[test]
    fn forwarded_host_takes_first_entry() {
        let mut request = HttpRequest::new();
        request.set_header("X-Forwarded-Host", "app.example.org, internal.lan");
        assert_eq!(request.forwarded_host(), Some("app.example.org"));
    }

    #[test]
    fn attached_cookie_replaces_existing() {
        let mut request = HttpRequest::new();
        request.attach_cookie("z", "old");
        request.attach_cookie("z", "new");
        assert_eq!(request.cookie("z").map(String::as_str), Some("new"));
    }
}
